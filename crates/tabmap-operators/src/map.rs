//! Typed map kernels and the row loop around them.
//!
//! A kernel binds a `Signature` to a pure compute function over raw values.
//! The loop owns everything else:
//! - polls the cancellation checkpoint,
//! - propagates missing values without calling the compute function,
//! - turns a rejected row (`None` from compute) into a missing output slot.
//!
//! Compute functions report row-local problems through the `ProblemBuilder`
//! they are handed; they never abort the loop.

use tabmap_core::error::{Error, Result};
use tabmap_core::storage::{Column, Element, Storage, StorageBuilder};

use crate::context::MapContext;
use crate::operand::{Operand, RowSource};
use crate::plan::Signature;
use crate::problems::ProblemBuilder;
use crate::traits::{BinaryMapOperation, TernaryMapOperation, UnaryMapOperation};

pub type UnaryFn<I, O> = fn(&I, usize, &mut ProblemBuilder) -> Option<O>;
pub type BinaryFn<I, A, O> = fn(&I, &A, usize, &mut ProblemBuilder) -> Option<O>;
pub type TernaryFn<I, A, B, O> = fn(&I, &A, &B, usize, &mut ProblemBuilder) -> Option<O>;

/// Typed view of the primary storage. The dispatcher already matched kinds,
/// so a mismatch here means the kernel was called directly with a wrong column.
fn primary<'a, I: Element>(column: &'a Column, sig: &Signature) -> Result<&'a Storage<I>> {
    I::storage(column).ok_or_else(|| Error::UnsupportedOperation {
        name: sig.name.to_string(),
        arity: sig.arity().count(),
        kind: column.kind(),
    })
}

pub struct UnaryKernel<I, O> {
    signature: Signature,
    compute: UnaryFn<I, O>,
}

impl<I: Element, O: Element> UnaryKernel<I, O> {
    pub fn new(name: &'static str, compute: UnaryFn<I, O>) -> Self {
        Self {
            signature: Signature::unary(name, I::KIND, O::KIND),
            compute,
        }
    }
}

impl<I: Element, O: Element> UnaryMapOperation for UnaryKernel<I, O> {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn run(&self, column: &Column, ctx: &mut MapContext<'_>) -> Result<Column> {
        let storage = primary::<I>(column, &self.signature)?;
        let rows = storage.len();
        let mut out = StorageBuilder::<O>::with_capacity(rows);

        for row in 0..rows {
            ctx.poll(row)?;
            let value = match storage.get(row) {
                Some(a) => (self.compute)(a, row, ctx.problems()),
                None => None,
            };
            out.push_option(value);
        }

        Ok(O::into_column(out.finish()))
    }
}

pub struct BinaryKernel<I, A, O> {
    signature: Signature,
    compute: BinaryFn<I, A, O>,
}

impl<I: Element, A: Element, O: Element> BinaryKernel<I, A, O> {
    pub fn new(name: &'static str, compute: BinaryFn<I, A, O>) -> Self {
        Self {
            signature: Signature::binary(name, I::KIND, A::KIND, O::KIND),
            compute,
        }
    }
}

impl<I: Element, A: Element, O: Element> BinaryMapOperation for BinaryKernel<I, A, O> {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn run(&self, column: &Column, arg: &Operand<'_>, ctx: &mut MapContext<'_>) -> Result<Column> {
        let storage = primary::<I>(column, &self.signature)?;
        let rows = storage.len();
        let arg = RowSource::<A>::resolve(arg, self.signature.name, 1, rows)?;
        let mut out = StorageBuilder::<O>::with_capacity(rows);

        for row in 0..rows {
            ctx.poll(row)?;
            let value = match (storage.get(row), arg.get(row)) {
                (Some(a), Some(b)) => (self.compute)(a, b, row, ctx.problems()),
                _ => None,
            };
            out.push_option(value);
        }

        Ok(O::into_column(out.finish()))
    }
}

pub struct TernaryKernel<I, A, B, O> {
    signature: Signature,
    compute: TernaryFn<I, A, B, O>,
}

impl<I: Element, A: Element, B: Element, O: Element> TernaryKernel<I, A, B, O> {
    pub fn new(name: &'static str, compute: TernaryFn<I, A, B, O>) -> Self {
        Self {
            signature: Signature::ternary(name, I::KIND, A::KIND, B::KIND, O::KIND),
            compute,
        }
    }
}

impl<I: Element, A: Element, B: Element, O: Element> TernaryMapOperation
    for TernaryKernel<I, A, B, O>
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn run(
        &self,
        column: &Column,
        arg0: &Operand<'_>,
        arg1: &Operand<'_>,
        ctx: &mut MapContext<'_>,
    ) -> Result<Column> {
        let storage = primary::<I>(column, &self.signature)?;
        let rows = storage.len();
        let arg0 = RowSource::<A>::resolve(arg0, self.signature.name, 1, rows)?;
        let arg1 = RowSource::<B>::resolve(arg1, self.signature.name, 2, rows)?;
        let mut out = StorageBuilder::<O>::with_capacity(rows);

        for row in 0..rows {
            ctx.poll(row)?;
            let value = match (storage.get(row), arg0.get(row), arg1.get(row)) {
                (Some(a), Some(b), Some(c)) => (self.compute)(a, b, c, row, ctx.problems()),
                _ => None,
            };
            out.push_option(value);
        }

        Ok(O::into_column(out.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabmap_core::checkpoint::NeverCancel;
    use tabmap_core::config::EngineConfig;
    use tabmap_core::types::Scalar;

    fn halve(v: &i64, row: usize, pb: &mut ProblemBuilder) -> Option<i64> {
        if v % 2 != 0 {
            pb.append_warning(row, "odd");
            return None;
        }
        Some(v / 2)
    }

    #[test]
    fn test_unary_loop_propagates_missing_and_rejections() {
        let kernel = UnaryKernel::<i64, i64>::new("halve", halve);
        let input: Column = Storage::from_options(vec![Some(4i64), None, Some(3)]).into();
        let cfg = EngineConfig::default();
        let mut ctx = MapContext::new(&NeverCancel, &cfg);

        let out = kernel.run(&input, &mut ctx).unwrap();
        let report = ctx.into_report();

        assert_eq!(out.scalar_at(0), Scalar::Long(2));
        assert!(out.is_missing(1));
        assert!(out.is_missing(2));
        // Only the rejected row reports; the missing input row does not.
        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].row, 2);
    }

    #[test]
    fn test_binary_aligned_operand_missing_propagates() {
        fn add(a: &i64, b: &i64, _: usize, _: &mut ProblemBuilder) -> Option<i64> {
            Some(a + b)
        }
        let kernel = BinaryKernel::<i64, i64, i64>::new("add", add);
        let left: Column = Storage::from_values(vec![1i64, 2, 3]).into();
        let right: Column = Storage::from_options(vec![Some(10i64), None, Some(30)]).into();
        let cfg = EngineConfig::default();
        let mut ctx = MapContext::new(&NeverCancel, &cfg);

        let out = kernel
            .run(&left, &Operand::Column(&right), &mut ctx)
            .unwrap();
        assert_eq!(out.scalar_at(0), Scalar::Long(11));
        assert!(out.is_missing(1));
        assert_eq!(out.scalar_at(2), Scalar::Long(33));
        assert!(ctx.into_report().problems.is_empty());
    }

    #[test]
    fn test_binary_rejects_misaligned_operand() {
        fn add(a: &i64, b: &i64, _: usize, _: &mut ProblemBuilder) -> Option<i64> {
            Some(a + b)
        }
        let kernel = BinaryKernel::<i64, i64, i64>::new("add", add);
        let left: Column = Storage::from_values(vec![1i64, 2, 3]).into();
        let right: Column = Storage::from_values(vec![1i64]).into();
        let cfg = EngineConfig::default();
        let mut ctx = MapContext::new(&NeverCancel, &cfg);

        let err = kernel
            .run(&left, &Operand::Column(&right), &mut ctx)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_ternary_aligned_operands_propagate_missing() {
        fn pick(a: &i64, b: &i64, flag: &bool, _: usize, _: &mut ProblemBuilder) -> Option<i64> {
            Some(if *flag { *a } else { *b })
        }
        let kernel = TernaryKernel::<i64, i64, bool, i64>::new("pick", pick);
        let input: Column = Storage::from_values(vec![1i64, 2, 3, 4]).into();
        let other: Column = Storage::from_options(vec![Some(10i64), Some(20), None, Some(40)]).into();
        let flags: Column = Storage::from_options(vec![Some(true), None, Some(true), Some(false)]).into();
        let cfg = EngineConfig::default();
        let mut ctx = MapContext::new(&NeverCancel, &cfg);

        let out = kernel
            .run(
                &input,
                &Operand::Column(&other),
                &Operand::Column(&flags),
                &mut ctx,
            )
            .unwrap();
        assert_eq!(out.scalar_at(0), Scalar::Long(1));
        // Missing flag or missing second operand leaves the row missing.
        assert!(out.is_missing(1));
        assert!(out.is_missing(2));
        assert_eq!(out.scalar_at(3), Scalar::Long(40));
        assert!(ctx.into_report().problems.is_empty());
    }

    #[test]
    fn test_ternary_mixes_broadcast_and_aligned_operands() {
        fn pick(a: &i64, b: &i64, flag: &bool, _: usize, _: &mut ProblemBuilder) -> Option<i64> {
            Some(if *flag { *a } else { *b })
        }
        let kernel = TernaryKernel::<i64, i64, bool, i64>::new("pick", pick);
        let input: Column = Storage::from_values(vec![1i64, 2]).into();
        let flags: Column = Storage::from_values(vec![false, true]).into();
        let cfg = EngineConfig::default();
        let mut ctx = MapContext::new(&NeverCancel, &cfg);

        let out = kernel
            .run(
                &input,
                &Operand::Scalar(Scalar::Long(7)),
                &Operand::Column(&flags),
                &mut ctx,
            )
            .unwrap();
        assert_eq!(out.scalar_at(0), Scalar::Long(7));
        assert_eq!(out.scalar_at(1), Scalar::Long(2));
    }
}
