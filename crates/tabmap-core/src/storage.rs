//! Column storages: immutable, homogeneous, fixed-length value sequences with
//! an explicit missing marker per slot.
//!
//! Values live in a contiguous `Vec<T>` and missing slots are tracked in a
//! parallel `BitVec`. A missing slot still holds `T::default()` so that the
//! value array stays dense and can be scanned without per-element boxing.
//!
//! `Column` is the tagged enumeration over every storage kind. Kernels work on
//! typed `Storage<T>` values obtained through `Element::storage`.

use bitvec::vec::BitVec;
use std::fmt;

use crate::error::{Error, Result};
use crate::kind::ElementKind;
use crate::types::{Date, Scalar};

/// Rust value types that can back a storage.
pub trait Element: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    const KIND: ElementKind;

    /// Typed view of a column, `None` when the column holds another kind.
    fn storage(column: &Column) -> Option<&Storage<Self>>;

    fn into_column(storage: Storage<Self>) -> Column;

    /// Extract a value of this kind from a scalar, `None` on kind mismatch or `Null`.
    fn from_scalar(scalar: &Scalar) -> Option<Self>;

    fn into_scalar(self) -> Scalar;

    /// Feed a canonical byte encoding of the value into `hasher`.
    fn hash_into(&self, hasher: &mut blake3::Hasher);
}

macro_rules! element {
    ($ty:ty, $kind:ident, |$v:ident, $h:ident| $hash:expr) => {
        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;

            fn storage(column: &Column) -> Option<&Storage<Self>> {
                match column {
                    Column::$kind(s) => Some(s),
                    _ => None,
                }
            }

            fn into_column(storage: Storage<Self>) -> Column {
                Column::$kind(storage)
            }

            fn from_scalar(scalar: &Scalar) -> Option<Self> {
                match scalar {
                    Scalar::$kind(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_scalar(self) -> Scalar {
                Scalar::$kind(self)
            }

            fn hash_into(&self, $h: &mut blake3::Hasher) {
                let $v = self;
                $hash;
            }
        }
    };
}

element!(i64, Long, |v, h| h.update(&v.to_le_bytes()));
element!(f64, Double, |v, h| h.update(&v.to_bits().to_le_bytes()));
element!(bool, Boolean, |v, h| h.update(&[*v as u8]));
element!(String, Text, |v, h| {
    h.update(&(v.len() as u64).to_le_bytes());
    h.update(v.as_bytes());
});
element!(Date, Date, |v, h| h.update(&v.days().to_le_bytes()));

/// Typed storage. Length is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Storage<T> {
    values: Vec<T>,
    missing: BitVec,
}

impl<T: Element> Storage<T> {
    /// Build from a value array and an aligned missing bitmap.
    pub fn new(values: Vec<T>, missing: BitVec) -> Result<Self> {
        if values.len() != missing.len() {
            return Err(Error::LengthMismatch {
                expected: values.len(),
                actual: missing.len(),
            });
        }
        Ok(Self { values, missing })
    }

    /// Storage with every slot present.
    pub fn from_values(values: Vec<T>) -> Self {
        let missing = BitVec::repeat(false, values.len());
        Self { values, missing }
    }

    /// Storage where `None` marks a missing slot.
    pub fn from_options<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let items = items.into_iter();
        let mut builder = StorageBuilder::with_capacity(items.size_hint().0);
        for item in items {
            match item {
                Some(v) => builder.push(v),
                None => builder.push_missing(),
            }
        }
        builder.finish()
    }

    /// Storage of `len` missing slots.
    pub fn all_missing(len: usize) -> Self {
        Self {
            values: vec![T::default(); len],
            missing: BitVec::repeat(true, len),
        }
    }

    pub fn kind(&self) -> ElementKind {
        T::KIND
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Panics when `i` is out of bounds, like slice indexing.
    pub fn is_missing(&self, i: usize) -> bool {
        self.missing[i]
    }

    /// Raw value at `i`. Only meaningful when `!is_missing(i)`; a missing slot
    /// returns the filler default.
    pub fn value_at(&self, i: usize) -> &T {
        debug_assert!(!self.missing[i], "value_at({i}) on a missing slot");
        &self.values[i]
    }

    /// Value at `i`, `None` when missing.
    pub fn get(&self, i: usize) -> Option<&T> {
        if self.missing[i] {
            None
        } else {
            Some(&self.values[i])
        }
    }

    pub fn missing_count(&self) -> usize {
        self.missing.count_ones()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.values
            .iter()
            .zip(self.missing.iter().by_vals())
            .map(|(v, missing)| if missing { None } else { Some(v) })
    }

    /// Dense value array, including filler values at missing slots.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn missing_bits(&self) -> &BitVec {
        &self.missing
    }
}

/// Append-only buffer that kernels fill row by row.
#[derive(Debug)]
pub struct StorageBuilder<T> {
    values: Vec<T>,
    missing: BitVec,
}

impl<T: Element> StorageBuilder<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            missing: BitVec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
        self.missing.push(false);
    }

    pub fn push_missing(&mut self) {
        self.values.push(T::default());
        self.missing.push(true);
    }

    pub fn push_option(&mut self, value: Option<T>) {
        match value {
            Some(v) => self.push(v),
            None => self.push_missing(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn finish(self) -> Storage<T> {
        Storage {
            values: self.values,
            missing: self.missing,
        }
    }
}

/// A storage of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Long(Storage<i64>),
    Double(Storage<f64>),
    Boolean(Storage<bool>),
    Text(Storage<String>),
    Date(Storage<Date>),
}

macro_rules! with_storage {
    ($column:expr, |$s:ident| $body:expr) => {
        match $column {
            Column::Long($s) => $body,
            Column::Double($s) => $body,
            Column::Boolean($s) => $body,
            Column::Text($s) => $body,
            Column::Date($s) => $body,
        }
    };
}

impl Column {
    /// All-missing column of the given kind.
    pub fn all_missing(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::Long => Column::Long(Storage::all_missing(len)),
            ElementKind::Double => Column::Double(Storage::all_missing(len)),
            ElementKind::Boolean => Column::Boolean(Storage::all_missing(len)),
            ElementKind::Text => Column::Text(Storage::all_missing(len)),
            ElementKind::Date => Column::Date(Storage::all_missing(len)),
        }
    }

    pub fn kind(&self) -> ElementKind {
        with_storage!(self, |s| s.kind())
    }

    pub fn len(&self) -> usize {
        with_storage!(self, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, i: usize) -> bool {
        with_storage!(self, |s| s.is_missing(i))
    }

    pub fn missing_count(&self) -> usize {
        with_storage!(self, |s| s.missing_count())
    }

    /// Slot `i` as a scalar; missing slots come back as `Scalar::Null`.
    pub fn scalar_at(&self, i: usize) -> Scalar {
        with_storage!(self, |s| s.get(i).cloned().map_or(Scalar::Null, Element::into_scalar))
    }

    /// Typed view, `None` when `T` is not this column's kind.
    pub fn as_storage<T: Element>(&self) -> Option<&Storage<T>> {
        T::storage(self)
    }

    /// Feed every slot into `hasher`: a presence byte, then the value when present.
    pub(crate) fn hash_slots(&self, hasher: &mut blake3::Hasher) {
        with_storage!(self, |s| {
            for slot in s.iter() {
                match slot {
                    Some(v) => {
                        hasher.update(&[1]);
                        v.hash_into(hasher);
                    }
                    None => {
                        hasher.update(&[0]);
                    }
                }
            }
        })
    }
}

impl<T: Element> From<Storage<T>> for Column {
    fn from(storage: Storage<T>) -> Self {
        T::into_column(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options_tracks_missing() {
        let s = Storage::from_options(vec![Some(1i64), None, Some(3)]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_missing(0));
        assert!(s.is_missing(1));
        assert_eq!(s.get(1), None);
        assert_eq!(s.get(2), Some(&3));
        assert_eq!(*s.value_at(0), 1);
        assert_eq!(s.missing_count(), 1);
        // Missing slots keep the filler default so values stay dense.
        assert_eq!(s.values(), &[1, 0, 3]);
    }

    #[test]
    fn test_new_rejects_misaligned_bitmap() {
        let err = Storage::new(vec![1.0f64, 2.0], BitVec::repeat(false, 3)).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_all_missing_column() {
        let col = Column::all_missing(ElementKind::Text, 4);
        assert_eq!(col.kind(), ElementKind::Text);
        assert_eq!(col.len(), 4);
        assert_eq!(col.missing_count(), 4);
        assert_eq!(col.scalar_at(2), Scalar::Null);
    }

    #[test]
    fn test_typed_projection() {
        let col: Column = Storage::from_values(vec![true, false]).into();
        assert_eq!(col.kind(), ElementKind::Boolean);
        assert!(col.as_storage::<bool>().is_some());
        assert!(col.as_storage::<i64>().is_none());
        assert_eq!(col.scalar_at(1), Scalar::Boolean(false));
    }

    #[test]
    fn test_builder_preserves_order() {
        let mut b = StorageBuilder::<String>::with_capacity(3);
        b.push("a".to_string());
        b.push_missing();
        b.push_option(Some("c".to_string()));
        assert_eq!(b.len(), 3);
        let s = b.finish();
        let collected: Vec<Option<&String>> = s.iter().collect();
        assert_eq!(collected[0].map(String::as_str), Some("a"));
        assert_eq!(collected[1], None);
        assert_eq!(collected[2].map(String::as_str), Some("c"));
    }
}
