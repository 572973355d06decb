//! Runtime: the call contract consumed by expression/table evaluators.
//!
//! Behavior:
//! - Owns the kernel registry and the engine config; both are read-only after
//!   construction, so one `Engine` can serve concurrent invocations.
//! - Each `execute` gets a fresh `MapContext` (problem builder + checkpoint).
//! - Outcomes are `Ok(MapResult)` or an `Error`; a cancelled or rejected call
//!   never exposes a partial storage or partial problem list.

use tabmap_core::checkpoint::{Checkpoint, NeverCancel};
use tabmap_core::config::EngineConfig;
use tabmap_core::error::Result;
use tabmap_core::storage::Column;
use tabmap_core::types::Scalar;

use tabmap_operators::{dispatch, Arity, MapContext, MapResult, Operand, Registry};

use crate::metrics::emit_span;

/// One map-operation request: a name, the primary storage and 0-2 operands.
#[derive(Debug, Clone)]
pub struct MapRequest<'a> {
    pub name: &'a str,
    pub primary: &'a Column,
    pub operands: Vec<Operand<'a>>,
}

impl<'a> MapRequest<'a> {
    pub fn unary(name: &'a str, primary: &'a Column) -> Self {
        Self {
            name,
            primary,
            operands: vec![],
        }
    }

    pub fn binary(name: &'a str, primary: &'a Column, arg: impl Into<Operand<'a>>) -> Self {
        Self {
            name,
            primary,
            operands: vec![arg.into()],
        }
    }

    pub fn ternary(
        name: &'a str,
        primary: &'a Column,
        arg0: impl Into<Operand<'a>>,
        arg1: impl Into<Operand<'a>>,
    ) -> Self {
        Self {
            name,
            primary,
            operands: vec![arg0.into(), arg1.into()],
        }
    }

    pub fn arity(&self) -> Option<Arity> {
        Arity::from_operand_count(self.operands.len())
    }
}

/// Convenience for scalar operands: `MapRequest::binary("add", &col, scalar(2i64))`.
pub fn scalar(value: impl Into<Scalar>) -> Operand<'static> {
    Operand::Scalar(value.into())
}

/// Engine owns the kernel registry and config.
pub struct Engine {
    cfg: EngineConfig,
    registry: Registry,
}

impl Engine {
    /// Engine with the builtin kernel catalog.
    pub fn new(cfg: EngineConfig) -> Result<Self> {
        Self::with_registry(cfg, Registry::with_builtins()?)
    }

    pub fn with_registry(cfg: EngineConfig, registry: Registry) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg, registry })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run one invocation, polling `checkpoint` between row batches.
    pub fn execute(&self, request: &MapRequest<'_>, checkpoint: &dyn Checkpoint) -> Result<MapResult> {
        let ctx = MapContext::new(checkpoint, &self.cfg);
        let outcome = dispatch(
            &self.registry,
            request.name,
            request.primary,
            &request.operands,
            ctx,
        );

        match &outcome {
            Ok(result) => emit_span(
                "completed",
                &[
                    ("op", request.name.to_string()),
                    ("rows", result.len().to_string()),
                    ("missing", result.storage.missing_count().to_string()),
                    ("problems", result.problems.len().to_string()),
                    ("suppressed", result.suppressed_problems.to_string()),
                ],
            ),
            Err(e) if e.is_cancelled() => emit_span(
                "cancelled",
                &[("op", request.name.to_string()), ("reason", e.to_string())],
            ),
            Err(e) => emit_span(
                "rejected",
                &[("op", request.name.to_string()), ("reason", e.to_string())],
            ),
        }

        outcome
    }

    /// Run one invocation that cannot be cancelled.
    pub fn execute_uncancellable(&self, request: &MapRequest<'_>) -> Result<MapResult> {
        self.execute(request, &NeverCancel)
    }
}
