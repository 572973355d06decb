#![forbid(unsafe_code)]
//! tabmap: typed, null-aware map operations over column storages.
//!
//! Re-exports the member crates so callers can depend on one package:
//! build a `Column`, wrap it in a `MapRequest`, and run it on an `Engine`.

pub use tabmap_core::prelude::*;
pub use tabmap_exec::{digest_result, scalar, CancellationToken, Engine, MapRequest};
pub use tabmap_operators::numeric::{
    round_range_message, ROUND_MAX_DOUBLE, ROUND_MAX_LONG, ROUND_MIN_DOUBLE, ROUND_MIN_LONG,
};
pub use tabmap_operators::{MapResult, Operand, Problem, Registry, Severity, Signature};
