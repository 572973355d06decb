//! Per-invocation execution context handed to kernels.

use tabmap_core::checkpoint::Checkpoint;
use tabmap_core::config::EngineConfig;
use tabmap_core::error::{Error, Result};

use crate::problems::{ProblemBuilder, ProblemReport};

/// Owns the invocation's problem builder and borrows the supervisor's
/// checkpoint. Never shared between invocations.
pub struct MapContext<'c> {
    problems: ProblemBuilder,
    checkpoint: &'c dyn Checkpoint,
    interval: usize,
}

impl<'c> MapContext<'c> {
    pub fn new(checkpoint: &'c dyn Checkpoint, config: &EngineConfig) -> Self {
        Self {
            problems: ProblemBuilder::with_limit(config.problem_limit),
            checkpoint,
            interval: config.checkpoint_interval.max(1),
        }
    }

    /// Cancellation checkpoint for `row`. Polls the supervisor on every
    /// `interval`-th row, starting with row 0.
    #[inline]
    pub fn poll(&self, row: usize) -> Result<()> {
        if row % self.interval == 0 && self.checkpoint.is_cancelled() {
            return Err(Error::Cancelled { row });
        }
        Ok(())
    }

    pub fn problems(&mut self) -> &mut ProblemBuilder {
        &mut self.problems
    }

    pub fn into_report(self) -> ProblemReport {
        self.problems.finish()
    }
}
