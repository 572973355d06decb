//! Kernel registry: (name, arity, kinds) -> kernel.
//!
//! Matching is structural. A kernel applies only when the primary storage kind
//! and every non-null operand kind equal its declared kinds exactly; nothing is
//! coerced. Overloads of one name are tried in registration order.

use std::collections::HashMap;

use tabmap_core::error::{Error, Result};
use tabmap_core::kind::ElementKind;

use crate::plan::{Arity, Signature};
use crate::traits::{BinaryMapOperation, MapOperation, TernaryMapOperation, UnaryMapOperation};

#[derive(Default)]
pub struct Registry {
    ops: HashMap<String, Vec<MapOperation>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the builtin numeric, logical and text kernels.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        crate::numeric::register(&mut registry)?;
        crate::logical::register(&mut registry)?;
        crate::text::register(&mut registry)?;
        Ok(registry)
    }

    /// Add a kernel. Two kernels with the same name, primary kind and operand
    /// kinds are rejected.
    pub fn register(&mut self, op: MapOperation) -> Result<()> {
        let sig = op.signature();
        let slot = self.ops.entry(sig.name.to_string()).or_default();
        if slot.iter().any(|existing| {
            let other = existing.signature();
            other.primary == sig.primary && other.operands() == sig.operands()
        }) {
            return Err(Error::Invariant(format!("duplicate kernel {sig}")));
        }
        slot.push(op);
        Ok(())
    }

    pub fn register_unary(&mut self, op: impl UnaryMapOperation) -> Result<()> {
        self.register(MapOperation::Unary(Box::new(op)))
    }

    pub fn register_binary(&mut self, op: impl BinaryMapOperation) -> Result<()> {
        self.register(MapOperation::Binary(Box::new(op)))
    }

    pub fn register_ternary(&mut self, op: impl TernaryMapOperation) -> Result<()> {
        self.register(MapOperation::Ternary(Box::new(op)))
    }

    /// Find the kernel for `name` applied to a `primary` storage with operands
    /// of the given kinds (`None` = null scalar, which matches any declared kind).
    ///
    /// Fails with `UnsupportedOperation` when no kernel of that name and arity
    /// exists for the primary kind, and with `UnexpectedOperandType` when one
    /// exists but an operand kind differs from what it declares.
    pub fn resolve(
        &self,
        name: &str,
        primary: ElementKind,
        operand_kinds: &[Option<ElementKind>],
    ) -> Result<&MapOperation> {
        let arity = Arity::from_operand_count(operand_kinds.len());
        let candidates: Vec<&MapOperation> = self
            .ops
            .get(name)
            .into_iter()
            .flatten()
            .filter(|op| Some(op.arity()) == arity && op.signature().primary == primary)
            .collect();

        let Some(first) = candidates.first() else {
            return Err(Error::UnsupportedOperation {
                name: name.to_string(),
                arity: operand_kinds.len() + 1,
                kind: primary,
            });
        };

        if let Some(op) = candidates
            .iter()
            .find(|op| accepts(op.signature(), operand_kinds))
        {
            return Ok(*op);
        }

        // Report against the first overload so the message is stable.
        let sig = first.signature();
        for (idx, (expected, found)) in sig.operands().iter().zip(operand_kinds).enumerate() {
            if let Some(found) = found {
                if found != expected {
                    return Err(Error::UnexpectedOperandType {
                        name: name.to_string(),
                        position: idx + 1,
                        expected: *expected,
                        found: *found,
                    });
                }
            }
        }
        Err(Error::Invariant(format!(
            "no overload of `{name}` accepted operands that match {sig}"
        )))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ops.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered signatures, sorted for stable listings.
    pub fn signatures(&self) -> Vec<&Signature> {
        let mut out: Vec<&Signature> = self
            .ops
            .values()
            .flatten()
            .map(MapOperation::signature)
            .collect();
        out.sort_by(|a, b| {
            (a.name, a.primary, a.operands()).cmp(&(b.name, b.primary, b.operands()))
        });
        out
    }
}

fn accepts(sig: &Signature, operand_kinds: &[Option<ElementKind>]) -> bool {
    sig.operands().len() == operand_kinds.len()
        && sig
            .operands()
            .iter()
            .zip(operand_kinds)
            .all(|(expected, found)| found.map_or(true, |k| k == *expected))
}
