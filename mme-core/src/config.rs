//! Engine configuration

use crate::MatrixError;
use serde::{Deserialize, Serialize};
use std::env;

/// Rows and columns of a freshly opened editor
pub const DEFAULT_SIZE: usize = 3;

/// Number of snapshots kept for undo
pub const DEFAULT_HISTORY_CAPACITY: usize = 14;

/// Settings applied when an engine is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_rows: usize,
    pub initial_cols: usize,
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_rows: DEFAULT_SIZE,
            initial_cols: DEFAULT_SIZE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.initial_rows = rows;
        self.initial_cols = cols;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Read `MME_ROWS`, `MME_COLS` and `MME_HISTORY_CAPACITY`.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_rows: env_usize("MME_ROWS").unwrap_or(defaults.initial_rows),
            initial_cols: env_usize("MME_COLS").unwrap_or(defaults.initial_cols),
            history_capacity: env_usize("MME_HISTORY_CAPACITY")
                .unwrap_or(defaults.history_capacity),
        }
    }

    pub fn validate(&self) -> Result<(), MatrixError> {
        if self.initial_rows == 0 || self.initial_cols == 0 {
            return Err(MatrixError::invalid_argument(format!(
                "initial size must be positive, got {}×{}",
                self.initial_rows, self.initial_cols
            )));
        }
        if self.history_capacity == 0 {
            return Err(MatrixError::invalid_argument("history capacity must be positive"));
        }
        Ok(())
    }
}

fn env_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.initial_rows, 3);
        assert_eq!(config.initial_cols, 3);
        assert_eq!(config.history_capacity, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(EngineConfig::new().with_size(0, 2).validate().is_err());
        assert!(EngineConfig::new().with_history_capacity(0).validate().is_err());
        assert!(EngineConfig::new().with_size(1, 1).with_history_capacity(1).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"initial_cols": 4}"#).unwrap();
        assert_eq!(config.initial_rows, 3);
        assert_eq!(config.initial_cols, 4);
        assert_eq!(config.history_capacity, 14);
    }
}
