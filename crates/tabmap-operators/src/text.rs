//! Kernels over text storages.

use tabmap_core::error::Result;

use crate::map::{BinaryKernel, UnaryKernel};
use crate::problems::ProblemBuilder;
use crate::registry::Registry;

/// Length in Unicode scalar values.
fn length(v: &String, _: usize, _: &mut ProblemBuilder) -> Option<i64> {
    // A String cannot hold more than isize::MAX bytes.
    Some(v.chars().count() as i64)
}

fn concat(a: &String, b: &String, _: usize, _: &mut ProblemBuilder) -> Option<String> {
    let mut out = String::with_capacity(a.len() + b.len());
    out.push_str(a);
    out.push_str(b);
    Some(out)
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register_unary(UnaryKernel::<String, i64>::new("length", length))?;
    registry.register_binary(BinaryKernel::<String, String, String>::new("concat", concat))?;
    Ok(())
}
