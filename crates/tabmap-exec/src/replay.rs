//! Deterministic replay helpers.
//!
//! Identical inputs must yield byte-identical storages and identical ordered
//! problems. These digests let callers and tests compare whole results cheaply.

use tabmap_core::hash::{hash_column, hash_serde, Hash256};
use tabmap_core::Result;
use tabmap_operators::MapResult;

/// Digest of a result: the output storage plus its problem list.
pub fn digest_result(result: &MapResult) -> Result<Hash256> {
    let storage = hash_column(&result.storage);
    let problems = hash_serde(&(&result.problems, result.suppressed_problems))?;
    Ok(combine(storage, problems))
}

fn combine(storage: Hash256, problems: Hash256) -> Hash256 {
    Hash256(std::array::from_fn(|i| storage.0[i] ^ problems.0[i]))
}
