//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rows between cancellation polls. Row 0 is always polled.
    pub checkpoint_interval: usize,

    /// Maximum number of problems kept per invocation. `None` keeps all of them;
    /// the overflow is only counted.
    pub problem_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: 64,
            problem_limit: None,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TABMAP_CHECKPOINT_INTERVAL`: rows between cancellation polls
    /// - `TABMAP_PROBLEM_LIMIT`: per-invocation cap on retained problems
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("TABMAP_CHECKPOINT_INTERVAL") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.checkpoint_interval = v;
            }
        }

        if let Ok(s) = std::env::var("TABMAP_PROBLEM_LIMIT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.problem_limit = Some(v);
            }
        }

        cfg
    }

    pub fn with_checkpoint_interval(mut self, rows: usize) -> Self {
        self.checkpoint_interval = rows;
        self
    }

    pub fn with_problem_limit(mut self, limit: Option<usize>) -> Self {
        self.problem_limit = limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.checkpoint_interval == 0 {
            return Err(Error::Config(
                "checkpoint_interval must be at least 1 row".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.checkpoint_interval, 64);
        assert_eq!(cfg.problem_limit, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let cfg = EngineConfig::default().with_checkpoint_interval(0);
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_serde_round_trip() {
        let cfg = EngineConfig::default().with_problem_limit(Some(10));
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
