//! Cooperative cancellation interface.
//!
//! The concrete token lives in `tabmap-exec`. We keep only the trait here so
//! kernels can poll a supervisor without depending on the runtime crate.

/// Polled by long-running row loops between rows (or row batches).
///
/// Implementations must be cheap to poll and safe to share across threads.
/// Once a checkpoint reports cancellation, the polling invocation aborts and
/// discards everything it built.
pub trait Checkpoint: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// A checkpoint that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Checkpoint for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<C: Checkpoint + ?Sized> Checkpoint for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
