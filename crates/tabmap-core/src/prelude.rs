//! Convenient re-exports for downstream crates.

pub use crate::checkpoint::{Checkpoint, NeverCancel};
pub use crate::config::EngineConfig;
pub use crate::error::{Error, Result};
pub use crate::hash::{hash_column, Hash256};
pub use crate::kind::ElementKind;
pub use crate::storage::{Column, Element, Storage, StorageBuilder};
pub use crate::types::{Date, Scalar};
