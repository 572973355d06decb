//! Kernels over boolean storages.

use tabmap_core::error::Result;

use crate::map::UnaryKernel;
use crate::problems::ProblemBuilder;
use crate::registry::Registry;

fn not(v: &bool, _: usize, _: &mut ProblemBuilder) -> Option<bool> {
    Some(!v)
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register_unary(UnaryKernel::<bool, bool>::new("not", not))
}
