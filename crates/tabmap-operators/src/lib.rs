#![forbid(unsafe_code)]
//! tabmap-operators: null-aware map kernels over column storages.
//!
//! Design intent:
//! - Keep this crate pure and synchronous (no threads, no async).
//! - One invocation = one sequential pass, one `ProblemBuilder`, one output buffer.
//! - Kernels plug in through `Registry`; the dispatcher never coerces kinds.

pub mod context;
pub mod dispatch;
pub mod logical;
pub mod map;
pub mod numeric;
pub mod operand;
pub mod plan;
pub mod problems;
pub mod registry;
pub mod result;
pub mod text;
pub mod traits;

pub use context::MapContext;
pub use dispatch::dispatch;
pub use operand::Operand;
pub use plan::{Arity, Signature};
pub use problems::{Problem, ProblemBuilder, ProblemReport, Severity};
pub use registry::Registry;
pub use result::MapResult;
pub use traits::{BinaryMapOperation, MapOperation, TernaryMapOperation, UnaryMapOperation};
