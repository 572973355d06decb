//! Scalar values and the small value types that storages hold.
//!
//! A `Scalar` is what a caller passes as a broadcast operand. `Scalar::Null`
//! means "no value was supplied", which is different from a missing cell
//! inside a storage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kind::ElementKind;

/// Calendar date stored as days since 1970-01-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(i32);

impl Date {
    pub const fn from_days(days: i32) -> Self {
        Self(days)
    }

    pub const fn days(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Long(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
    Date(Date),
}

impl Scalar {
    /// Kind of the value, `None` for `Null`.
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Scalar::Null => None,
            Scalar::Long(_) => Some(ElementKind::Long),
            Scalar::Double(_) => Some(ElementKind::Double),
            Scalar::Boolean(_) => Some(ElementKind::Boolean),
            Scalar::Text(_) => Some(ElementKind::Text),
            Scalar::Date(_) => Some(ElementKind::Date),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("Nothing"),
            Scalar::Long(v) => write!(f, "{v}"),
            Scalar::Double(v) => write!(f, "{v}"),
            Scalar::Boolean(v) => write!(f, "{v}"),
            Scalar::Text(v) => write!(f, "{v:?}"),
            Scalar::Date(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Long(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Double(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Boolean(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<Date> for Scalar {
    fn from(v: Date) -> Self {
        Scalar::Date(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}
