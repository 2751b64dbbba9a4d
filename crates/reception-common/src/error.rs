//! Error types for reception map generation.
//!
//! Every variant here is fatal for a run. Data-quality gaps (a missing report,
//! an unknown category, an operator absent from the operator file) are not
//! errors at all; callers skip them and log.

use thiserror::Error;

/// Result type alias using ReceptionError.
pub type ReceptionResult<T> = Result<T, ReceptionError>;

/// Primary error type for map generation.
#[derive(Debug, Error)]
pub enum ReceptionError {
    // === Configuration Errors ===
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Invalid map bounds: {0}")]
    InvalidBounds(String),

    // === Asset Errors ===
    #[error("Asset error for '{path}': {message}")]
    Asset { path: String, message: String },

    #[error("Font error: {0}")]
    Font(String),

    #[error("Projection error: {0}")]
    Projection(String),

    // === Data Errors ===
    #[error("Invalid record in {source_name} at line {line}: {message}")]
    InvalidRecord {
        source_name: String,
        line: u64,
        message: String,
    },

    // === Output Errors ===
    #[error("Failed to write map '{path}': {message}")]
    Output { path: String, message: String },
}

impl ReceptionError {
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReceptionError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn asset(path: impl AsRef<std::path::Path>, message: impl ToString) -> Self {
        ReceptionError::Asset {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    pub fn output(path: impl AsRef<std::path::Path>, message: impl ToString) -> Self {
        ReceptionError::Output {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Short label for the failure class, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ReceptionError::InvalidConfig { .. } | ReceptionError::InvalidBounds(_) => "config",
            ReceptionError::Asset { .. }
            | ReceptionError::Font(_)
            | ReceptionError::Projection(_) => "asset",
            ReceptionError::InvalidRecord { .. } => "data",
            ReceptionError::Output { .. } => "output",
        }
    }
}
