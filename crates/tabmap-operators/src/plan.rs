//! Kernel planning surfaces: `Arity` and `Signature`.
//!
//! A signature is everything the dispatcher needs to pick a kernel without
//! running it: the name, the primary storage kind, the declared operand kinds
//! and the kind of the storage it produces.

use serde::{Deserialize, Serialize};
use std::fmt;

use tabmap_core::error::{Error, Result};
use tabmap_core::kind::ElementKind;

/// Number of inputs, the primary storage included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Arity {
    Unary,
    Binary,
    Ternary,
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
            Arity::Ternary => 3,
        }
    }

    /// Arity for a call carrying `n` operands besides the primary storage.
    pub fn from_operand_count(n: usize) -> Option<Self> {
        match n {
            0 => Some(Arity::Unary),
            1 => Some(Arity::Binary),
            2 => Some(Arity::Ternary),
            _ => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Declared shape of a kernel. The operand list always has 0 to 2 entries;
/// the fields are read through accessors so that bound cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub name: &'static str,
    pub primary: ElementKind,
    pub output: ElementKind,
    arity: Arity,
    operands: Vec<ElementKind>,
}

impl Signature {
    /// Fails with `Error::Invariant` for more than two operands.
    pub fn new(
        name: &'static str,
        primary: ElementKind,
        operands: Vec<ElementKind>,
        output: ElementKind,
    ) -> Result<Self> {
        let arity = Arity::from_operand_count(operands.len()).ok_or_else(|| {
            Error::Invariant(format!(
                "`{name}` declares {} operands; at most 2 are supported",
                operands.len()
            ))
        })?;
        Ok(Self {
            name,
            primary,
            output,
            arity,
            operands,
        })
    }

    pub fn unary(name: &'static str, primary: ElementKind, output: ElementKind) -> Self {
        Self {
            name,
            primary,
            output,
            arity: Arity::Unary,
            operands: vec![],
        }
    }

    pub fn binary(
        name: &'static str,
        primary: ElementKind,
        arg: ElementKind,
        output: ElementKind,
    ) -> Self {
        Self {
            name,
            primary,
            output,
            arity: Arity::Binary,
            operands: vec![arg],
        }
    }

    pub fn ternary(
        name: &'static str,
        primary: ElementKind,
        arg0: ElementKind,
        arg1: ElementKind,
        output: ElementKind,
    ) -> Self {
        Self {
            name,
            primary,
            output,
            arity: Arity::Ternary,
            operands: vec![arg0, arg1],
        }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Declared operand kinds, in argument order.
    pub fn operands(&self) -> &[ElementKind] {
        &self.operands
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}", self.name, self.primary)?;
        for kind in &self.operands {
            write!(f, ", {:?}", kind)?;
        }
        write!(f, ") -> {:?}", self.output)
    }
}
