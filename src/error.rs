//! Error taxonomy for the engine.
//!
//! Structural errors are returned to the caller as-is. An empty selection
//! is a success, never an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by classification, selection and dataset loading.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Classification input rejected (e.g. no answers at all).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Category outside {Short, Elaborate, Realistic}.
    #[error("Invalid category: {0:?} (expected Short, Elaborate or Realistic)")]
    InvalidCategory(String),

    /// A required field was absent on a content row.
    #[error("Missing field {field:?} on row {row}")]
    MissingField { field: String, row: usize },

    /// No backing dataset for a content identifier.
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// A dataset file exists but could not be parsed.
    #[error("Failed to read dataset {path:?}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The data directory could not be turned into a dataset listing.
    #[error("Invalid data directory {path:?}: {reason}")]
    DataDir { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// True for errors caused by the caller's input rather than the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput(_)
                | EngineError::InvalidCategory(_)
                | EngineError::MissingField { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(EngineError::InvalidInput("empty".into()).is_client_error());
        assert!(EngineError::InvalidCategory("Long".into()).is_client_error());
        assert!(EngineError::MissingField { field: "difficulty".into(), row: 2 }.is_client_error());

        assert!(!EngineError::NotFound("x".into()).is_client_error());
        assert!(!EngineError::DataDir { path: PathBuf::from("/data"), reason: "bad".into() }.is_client_error());
        assert!(!EngineError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")).is_client_error());
    }
}
