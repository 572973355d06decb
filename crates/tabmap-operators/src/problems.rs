//! Row-scoped diagnostics collected during one invocation.
//!
//! Problems never change control flow: a kernel that rejects a row records a
//! problem, the row comes out missing, and the loop moves on.

use serde::{Deserialize, Serialize};
use std::fmt;

use tabmap_core::types::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub row: usize,
    pub severity: Severity,
    pub message: String,
    /// Raw input value that triggered the problem, when the kernel supplies it.
    pub value: Option<Scalar>,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.severity, self.message)
    }
}

/// Finalized diagnostics of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemReport {
    /// Ordered by row index; problems on the same row keep insertion order.
    pub problems: Vec<Problem>,
    /// Problems dropped because the configured limit was reached.
    pub suppressed: usize,
}

/// Per-invocation problem sink. Owned by exactly one invocation.
#[derive(Debug, Default)]
pub struct ProblemBuilder {
    problems: Vec<Problem>,
    limit: Option<usize>,
    suppressed: usize,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn append_warning(&mut self, row: usize, message: impl Into<String>) {
        self.append(row, Severity::Warning, message.into(), None);
    }

    pub fn append_error(&mut self, row: usize, message: impl Into<String>) {
        self.append(row, Severity::Error, message.into(), None);
    }

    pub fn append_warning_with_value(
        &mut self,
        row: usize,
        message: impl Into<String>,
        value: impl Into<Scalar>,
    ) {
        self.append(row, Severity::Warning, message.into(), Some(value.into()));
    }

    pub fn append_error_with_value(
        &mut self,
        row: usize,
        message: impl Into<String>,
        value: impl Into<Scalar>,
    ) {
        self.append(row, Severity::Error, message.into(), Some(value.into()));
    }

    fn append(&mut self, row: usize, severity: Severity, message: String, value: Option<Scalar>) {
        if self.limit.is_some_and(|limit| self.problems.len() >= limit) {
            self.suppressed += 1;
            return;
        }
        self.problems.push(Problem {
            row,
            severity,
            message,
            value,
        });
    }

    /// Number of problems retained so far.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty() && self.suppressed == 0
    }

    pub fn has_errors(&self) -> bool {
        self.problems.iter().any(|p| p.severity == Severity::Error)
    }

    pub fn finish(self) -> ProblemReport {
        let mut problems = self.problems;
        // Stable: same-row problems stay in the order they were reported.
        problems.sort_by_key(|p| p.row);
        ProblemReport {
            problems,
            suppressed: self.suppressed,
        }
    }
}
