use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The caller's cancellation signal fired before resolution finished.
    /// Never produced by a provider failure.
    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

impl AppError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled(_))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
