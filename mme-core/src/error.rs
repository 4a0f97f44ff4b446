//! Structured errors for the matrix engine
//!
//! Errors are local to the call that produced them. A rejected call never
//! leaves a partially mutated matrix behind; the caller decides how to
//! surface each kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const INDEX_OUT_OF_RANGE: &str = "INDEX_OUT_OF_RANGE";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    // Raised by front ends, never by the engine itself
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
}

/// Which dimension an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Error type for engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Non-positive size or malformed import
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Row or column index outside the current bounds
    #[error("{axis} index {index} out of range (size {len})")]
    IndexOutOfRange { axis: Axis, index: usize, len: usize },

    /// Shape precondition not met (square, augmented)
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl MatrixError {
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        MatrixError::InvalidArgument(details.into())
    }

    pub fn invalid_state(details: impl Into<String>) -> Self {
        MatrixError::InvalidState(details.into())
    }

    pub fn row_out_of_range(index: usize, len: usize) -> Self {
        MatrixError::IndexOutOfRange { axis: Axis::Row, index, len }
    }

    pub fn column_out_of_range(index: usize, len: usize) -> Self {
        MatrixError::IndexOutOfRange { axis: Axis::Column, index, len }
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            MatrixError::InvalidArgument(_) => codes::INVALID_ARGUMENT,
            MatrixError::IndexOutOfRange { .. } => codes::INDEX_OUT_OF_RANGE,
            MatrixError::InvalidState(_) => codes::INVALID_STATE,
        }
    }

    /// Short hint for whoever shows the error to a user
    pub fn suggestion(&self) -> Option<String> {
        match self {
            MatrixError::InvalidArgument(_) => {
                Some("Sizes must be at least 1 and imports need a non-empty row".to_string())
            }
            MatrixError::IndexOutOfRange { axis, len, .. } => {
                Some(format!("Use a {} index between 0 and {}", axis, len.saturating_sub(1)))
            }
            MatrixError::InvalidState(_) => None,
        }
    }

    /// Serializable view of this error
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion(),
        }
    }
}

/// Serializable error payload for front ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Send one JSON object per line with an \"op\" field")
    }
}

impl From<&MatrixError> for ErrorReport {
    fn from(err: &MatrixError) -> Self {
        err.report()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(MatrixError::invalid_argument("rows").code(), codes::INVALID_ARGUMENT);
        assert_eq!(MatrixError::row_out_of_range(4, 3).code(), codes::INDEX_OUT_OF_RANGE);
        assert_eq!(MatrixError::invalid_state("square").code(), codes::INVALID_STATE);
    }

    #[test]
    fn test_index_message() {
        let err = MatrixError::column_out_of_range(5, 2);
        assert_eq!(err.to_string(), "column index 5 out of range (size 2)");
        assert_eq!(err.suggestion().as_deref(), Some("Use a column index between 0 and 1"));
    }

    #[test]
    fn test_report_serialization() {
        let report = MatrixError::invalid_state("determinant requires a square matrix").report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["code"], "INVALID_STATE");
        assert_eq!(json["message"], "Invalid state: determinant requires a square matrix");
        // No suggestion for state errors, so the field is omitted
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn test_parse_error_display() {
        let report = ErrorReport::parse_error("expected value at line 1");
        let text = report.to_string();
        assert!(text.starts_with("[PARSE_ERROR] Parse error: expected value"));
        assert!(text.contains("suggestion"));
    }
}
