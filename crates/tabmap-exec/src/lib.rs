#![forbid(unsafe_code)]
//! tabmap-exec: engine facade, cancellation, tracing hooks and deterministic
//! result digests.
//!
//! Each invocation is a single sequential pass. Parallelism comes from callers
//! running independent invocations on their own threads against a shared
//! `Engine`.

pub mod cancel;
pub mod metrics;
pub mod replay;
pub mod runtime;

pub use cancel::CancellationToken;
pub use replay::digest_result;
pub use runtime::{scalar, Engine, MapRequest};
