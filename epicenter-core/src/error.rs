//! Error types for the EPICENTER workspace.
//!
//! The cache surface itself is deliberately infallible: lookups of absent ids
//! are valid no-ops and boundary degradations are logged rather than raised.
//! `Result` only appears where configuration is parsed or validated.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all EPICENTER errors.
#[derive(Debug, Error)]
pub enum EpicenterError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for EPICENTER operations.
pub type EpicenterResult<T> = Result<T, EpicenterError>;
