//! Stable hashing helpers for storages and diagnostics.

use blake3::Hasher;
use serde::Serialize;

use crate::error::Result;
use crate::storage::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Digest of a serializable value through its JSON encoding. Used for
/// problem lists, whose order and content must be reproducible.
pub fn hash_serde<T: Serialize>(v: &T) -> Result<Hash256> {
    let bytes = serde_json::to_vec(v)?;
    Ok(Hash256(blake3::hash(&bytes).into()))
}

/// Digest of a column's observable content: kind, length, missing slots and
/// present values. Filler values behind missing slots do not contribute.
pub fn hash_column(column: &Column) -> Hash256 {
    let mut h = Hasher::new();
    h.update(&[column.kind().tag()]);
    h.update(&(column.len() as u64).to_le_bytes());
    column.hash_slots(&mut h);
    Hash256(h.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    #[test]
    fn test_identical_columns_hash_equal() {
        let a: Column = Storage::from_options(vec![Some(1i64), None, Some(3)]).into();
        let b: Column = Storage::from_options(vec![Some(1i64), None, Some(3)]).into();
        assert_eq!(hash_column(&a), hash_column(&b));
    }

    #[test]
    fn test_missing_differs_from_zero() {
        let a: Column = Storage::from_options(vec![Some(0i64)]).into();
        let b: Column = Storage::<i64>::all_missing(1).into();
        assert_ne!(hash_column(&a), hash_column(&b));
    }

    #[test]
    fn test_kind_participates() {
        let a: Column = Storage::<i64>::all_missing(2).into();
        let b: Column = Storage::<f64>::all_missing(2).into();
        assert_ne!(hash_column(&a), hash_column(&b));
    }

    #[test]
    fn test_hex_and_serde_digest() {
        let a = hash_serde(&("row", 1u32)).unwrap();
        let b = hash_serde(&("row", 1u32)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
        assert_ne!(a, hash_serde(&("row", 2u32)).unwrap());
    }
}
