//! Numeric kernel family for long and double storages.
//!
//! Domain checks are kernel-local: each compute function validates its raw
//! inputs before touching the arithmetic and reports a row problem instead of
//! failing the call.

pub mod double;
pub mod long;

use std::fmt::Display;

use tabmap_core::error::Result;

use crate::registry::Registry;

/// Smallest long accepted by `round`.
pub const ROUND_MIN_LONG: i64 = -99_999_999_999_999;

/// Largest long accepted by `round`.
pub const ROUND_MAX_LONG: i64 = 99_999_999_999_999;

/// Smallest double accepted by `round`.
pub const ROUND_MIN_DOUBLE: f64 = -99_999_999_999_999.0;

/// Largest double accepted by `round`.
pub const ROUND_MAX_DOUBLE: f64 = 99_999_999_999_999.0;

/// Message reported for a `round` input outside the supported range.
pub fn round_range_message(value: impl Display) -> String {
    format!(
        "Error: `round` can only accept values between {} and {} (inclusive), but was {}",
        ROUND_MIN_LONG, ROUND_MAX_LONG, value
    )
}

pub(crate) fn overflow_message(op: &str, detail: impl Display) -> String {
    format!("Arithmetic overflow in `{op}`: {detail}")
}

pub(crate) const DIVISION_BY_ZERO: &str = "Division by zero";

pub fn register(registry: &mut Registry) -> Result<()> {
    long::register(registry)?;
    double::register(registry)?;
    Ok(())
}
