use std::io;
use thiserror::Error;

/// Crate-wide error type.
///
/// The interpreter pipeline itself is total and never produces one of these;
/// they come from configuration, roster loading and external strategies.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed JSON (roster files, external strategy payloads).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., bad environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents a failure reported by an external interpretation strategy.
    #[error("External interpreter error: {0}")]
    External(String),
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Validation(format!("Date parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
