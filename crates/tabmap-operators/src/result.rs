//! Result assembly: pairs the computed storage with the finalized problems.

use tabmap_core::error::{Error, Result};
use tabmap_core::storage::Column;

use crate::problems::{Problem, ProblemReport, Severity};

/// Successful outcome of one invocation. The caller owns the storage.
#[derive(Debug, Clone, PartialEq)]
pub struct MapResult {
    pub storage: Column,
    /// Row-ordered diagnostics.
    pub problems: Vec<Problem>,
    /// Problems not retained because of the configured limit.
    pub suppressed_problems: usize,
}

impl MapResult {
    /// Package kernel output. The storage must have exactly `expected_len` rows,
    /// no matter how many rows were missing or flagged.
    pub fn assemble(storage: Column, report: ProblemReport, expected_len: usize) -> Result<Self> {
        if storage.len() != expected_len {
            return Err(Error::Invariant(format!(
                "kernel produced {} rows for a {}-row input",
                storage.len(),
                expected_len
            )));
        }
        Ok(Self {
            storage,
            problems: report.problems,
            suppressed_problems: report.suppressed,
        })
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Problem> + '_ {
        self.problems
            .iter()
            .filter(|p| p.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Problem> + '_ {
        self.problems
            .iter()
            .filter(|p| p.severity == Severity::Warning)
    }

    pub fn into_parts(self) -> (Column, Vec<Problem>) {
        (self.storage, self.problems)
    }
}
