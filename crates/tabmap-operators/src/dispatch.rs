//! Dispatcher: resolve a named operation against the registry, validate the
//! operands, and run the selected kernel once.
//!
//! Everything that can abort a call without a result (unknown operation,
//! operand kind or length mismatch) is checked here before row 0. After that
//! only cancellation can abort. A null scalar operand short-circuits to an
//! all-missing result once a kernel is found, before operand kinds are checked.

use tabmap_core::error::{Error, Result};
use tabmap_core::storage::Column;

use crate::context::MapContext;
use crate::operand::Operand;
use crate::problems::ProblemReport;
use crate::registry::Registry;
use crate::result::MapResult;

pub fn dispatch(
    registry: &Registry,
    name: &str,
    primary: &Column,
    operands: &[Operand<'_>],
    mut ctx: MapContext<'_>,
) -> Result<MapResult> {
    let rows = primary.len();
    // With a null scalar present the operand kinds are never checked; the
    // first kernel for (name, arity, primary kind) only supplies the output kind.
    let has_null = operands.iter().any(Operand::is_null);
    let kinds: Vec<_> = if has_null {
        vec![None; operands.len()]
    } else {
        operands.iter().map(Operand::kind).collect()
    };
    let op = registry.resolve(name, primary.kind(), &kinds)?;

    for operand in operands {
        if let Operand::Column(c) = operand {
            if c.len() != rows {
                return Err(Error::LengthMismatch {
                    expected: rows,
                    actual: c.len(),
                });
            }
        }
    }

    let sig = op.signature();

    // A null scalar makes every row missing; skip the loop entirely.
    if has_null {
        #[cfg(feature = "tracing")]
        tracing::trace!(op = %sig, rows, "null operand, all-missing result");
        return MapResult::assemble(
            Column::all_missing(sig.output, rows),
            ProblemReport::default(),
            rows,
        );
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(op = %sig, rows, "dispatching kernel");

    let storage = op.run(primary, operands, &mut ctx)?;
    MapResult::assemble(storage, ctx.into_report(), rows)
}
