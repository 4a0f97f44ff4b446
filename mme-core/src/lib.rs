//! MME Core - Shared types
//!
//! This crate provides the types every layer of the editor agrees on:
//! - `MatrixError`: The three error kinds the engine can raise
//! - `ChangeRegion`: Rectangle of cells affected by a mutation
//! - `EngineConfig`: Initial size and undo depth

mod config;
mod error;
mod region;

pub use config::{EngineConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_SIZE};
pub use error::{codes, Axis, ErrorReport, MatrixError};
pub use region::ChangeRegion;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ChangeRegion, EngineConfig, MatrixError};
}
