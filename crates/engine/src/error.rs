//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a budget or line item lookup misses.
//! - [`ImportRejected`] thrown when an imported payload fails the shape check.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ImportRejected`]: EngineError::ImportRejected
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Import rejected: {0}")]
    ImportRejected(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("export error: {0}")]
    Export(String),
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::Export(err.to_string())
    }
}
