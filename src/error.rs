use crate::domain::batch::BatchError;
use thiserror::Error;

/// Process-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not load requests: {0}")]
    Requests(String),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::Requests(_) => 66,
            Self::Batch(_) => 69,
            Self::Internal(_) => 70,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
