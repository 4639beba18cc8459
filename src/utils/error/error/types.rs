//! Error types for the engine

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or out-of-range caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A job already holds the requested resource
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// A worker task died before reporting a result
    #[error("Worker error: {0}")]
    Worker(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Whether this error is reported to the caller as its own outcome rather
    /// than the generic internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::Validation(_) | EngineError::Conflict(_))
    }
}
