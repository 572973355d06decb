//! Map-operation traits + the closed `MapOperation` capability set.
//!
//! The dispatcher calls `signature()` to match a request against a kernel,
//! then `run(...)` exactly once per invocation. Kernels are stateless across
//! invocations and must be deterministic given the same inputs.

use std::fmt;

use tabmap_core::error::{Error, Result};
use tabmap_core::storage::Column;

use crate::context::MapContext;
use crate::operand::Operand;
use crate::plan::{Arity, Signature};

pub trait UnaryMapOperation: Send + Sync + 'static {
    fn signature(&self) -> &Signature;

    fn run(&self, storage: &Column, ctx: &mut MapContext<'_>) -> Result<Column>;
}

pub trait BinaryMapOperation: Send + Sync + 'static {
    fn signature(&self) -> &Signature;

    fn run(&self, storage: &Column, arg: &Operand<'_>, ctx: &mut MapContext<'_>) -> Result<Column>;
}

pub trait TernaryMapOperation: Send + Sync + 'static {
    fn signature(&self) -> &Signature;

    fn run(
        &self,
        storage: &Column,
        arg0: &Operand<'_>,
        arg1: &Operand<'_>,
        ctx: &mut MapContext<'_>,
    ) -> Result<Column>;
}

/// A registered kernel of one of the three arities.
pub enum MapOperation {
    Unary(Box<dyn UnaryMapOperation>),
    Binary(Box<dyn BinaryMapOperation>),
    Ternary(Box<dyn TernaryMapOperation>),
}

impl fmt::Debug for MapOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOperation")
            .field("arity", &self.arity())
            .field("signature", self.signature())
            .finish()
    }
}

impl MapOperation {
    pub fn signature(&self) -> &Signature {
        match self {
            MapOperation::Unary(op) => op.signature(),
            MapOperation::Binary(op) => op.signature(),
            MapOperation::Ternary(op) => op.signature(),
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            MapOperation::Unary(_) => Arity::Unary,
            MapOperation::Binary(_) => Arity::Binary,
            MapOperation::Ternary(_) => Arity::Ternary,
        }
    }

    /// Run the kernel over `storage` with exactly `arity - 1` operands.
    pub fn run(
        &self,
        storage: &Column,
        operands: &[Operand<'_>],
        ctx: &mut MapContext<'_>,
    ) -> Result<Column> {
        match (self, operands) {
            (MapOperation::Unary(op), []) => op.run(storage, ctx),
            (MapOperation::Binary(op), [a]) => op.run(storage, a, ctx),
            (MapOperation::Ternary(op), [a, b]) => op.run(storage, a, b, ctx),
            _ => Err(Error::Invariant(format!(
                "`{}` expects {} operand(s), got {}",
                self.signature().name,
                self.arity().count() - 1,
                operands.len()
            ))),
        }
    }
}
