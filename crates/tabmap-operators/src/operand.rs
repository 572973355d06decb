//! Operands: a broadcast scalar or a storage aligned by row with the primary.

use tabmap_core::error::{Error, Result};
use tabmap_core::kind::ElementKind;
use tabmap_core::storage::{Column, Element, Storage};
use tabmap_core::types::Scalar;

#[derive(Debug, Clone)]
pub enum Operand<'a> {
    Scalar(Scalar),
    Column(&'a Column),
}

impl<'a> Operand<'a> {
    /// Runtime kind; `None` for a null scalar.
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Operand::Scalar(s) => s.kind(),
            Operand::Column(c) => Some(c.kind()),
        }
    }

    /// A null scalar, i.e. "no value supplied". A column is never null even
    /// when every slot is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Scalar(Scalar::Null))
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(s: Scalar) -> Self {
        Operand::Scalar(s)
    }
}

impl<'a> From<&'a Column> for Operand<'a> {
    fn from(c: &'a Column) -> Self {
        Operand::Column(c)
    }
}

/// An operand resolved once per invocation into its typed form.
#[derive(Debug)]
pub enum RowSource<'a, T> {
    Broadcast(T),
    Aligned(&'a Storage<T>),
}

impl<'a, T: Element> RowSource<'a, T> {
    /// Resolve `operand` as argument `position` (1-based) of kernel `name`,
    /// checking its kind and, for storages, its length against `rows`.
    pub fn resolve(
        operand: &Operand<'a>,
        name: &str,
        position: usize,
        rows: usize,
    ) -> Result<Self> {
        let mismatch = |found: ElementKind| Error::UnexpectedOperandType {
            name: name.to_string(),
            position,
            expected: T::KIND,
            found,
        };
        match operand {
            Operand::Scalar(Scalar::Null) => Err(Error::Invariant(format!(
                "null operand {position} of `{name}` reached the row loop"
            ))),
            Operand::Scalar(s) => T::from_scalar(s)
                .map(RowSource::Broadcast)
                .ok_or_else(|| mismatch(s.kind().unwrap_or(T::KIND))),
            Operand::Column(c) => {
                let storage = T::storage(*c).ok_or_else(|| mismatch(c.kind()))?;
                if storage.len() != rows {
                    return Err(Error::LengthMismatch {
                        expected: rows,
                        actual: storage.len(),
                    });
                }
                Ok(RowSource::Aligned(storage))
            }
        }
    }

    /// Value at `row`, `None` when an aligned storage is missing there.
    pub fn get(&self, row: usize) -> Option<&T> {
        match self {
            RowSource::Broadcast(v) => Some(v),
            RowSource::Aligned(s) => s.get(row),
        }
    }
}
