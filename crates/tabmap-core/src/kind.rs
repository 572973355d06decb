//! Element kinds. Pure data; every storage and scalar carries one of these.
//!
//! Kernels declare their operand kinds with this enum and the dispatcher
//! compares them structurally. There is no implicit coercion between kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    Long,
    Double,
    Boolean,
    Text,
    Date,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Long,
        ElementKind::Double,
        ElementKind::Boolean,
        ElementKind::Text,
        ElementKind::Date,
    ];

    /// Numeric kinds are backed by packed primitive arrays.
    pub fn is_numeric(self) -> bool {
        matches!(self, ElementKind::Long | ElementKind::Double)
    }

    /// Stable one-byte tag used when hashing storages.
    pub(crate) fn tag(self) -> u8 {
        match self {
            ElementKind::Long => 1,
            ElementKind::Double => 2,
            ElementKind::Boolean => 3,
            ElementKind::Text => 4,
            ElementKind::Date => 5,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Long => "a long",
            ElementKind::Double => "a double",
            ElementKind::Boolean => "a boolean",
            ElementKind::Text => "a text",
            ElementKind::Date => "a date",
        };
        f.write_str(name)
    }
}
