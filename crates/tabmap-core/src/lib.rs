#![forbid(unsafe_code)]
//! tabmap-core: element kinds, scalars, column storages and the shared
//! interfaces (cancellation checkpoint, config, errors, hashing) that the
//! operator and runtime crates build on.
//!
//! Core does no I/O and spawns nothing.

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod hash;
pub mod kind;
pub mod prelude;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
