use thiserror::Error;

use crate::kind::ElementKind;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Call-aborting failures.
///
/// Row-local problems (values outside a kernel's domain, division by zero)
/// are not errors; they travel alongside a successful result instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported operation `{name}` with arity {arity} on {kind} storage")]
    UnsupportedOperation {
        name: String,
        arity: usize,
        kind: ElementKind,
    },

    #[error("unexpected operand type for `{name}` argument {position}: expected {expected}, found {found}")]
    UnexpectedOperandType {
        name: String,
        position: usize,
        expected: ElementKind,
        found: ElementKind,
    },

    #[error("operand length mismatch: expected {expected} rows, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("operation cancelled at row {row}")]
    Cancelled { row: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Hashing error: {0}")]
    Hash(String),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Hash(e.to_string())
    }
}
