//! Error types for phishguard.

use std::time::Duration;

/// Errors from one external classifier invocation.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("Failed to spawn classifier process: {0}")]
    Spawn(std::io::Error),

    #[error("I/O error while capturing classifier output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Classifier process failed (exit code {exit_code:?})")]
    ProcessFailed {
        exit_code: Option<i32>,
        /// Captured diagnostic output; logged, never sent to callers.
        stderr: String,
    },

    #[error("Classifier process timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors surfaced to callers of the prediction orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("URL is required")]
    InvalidInput,

    #[error("Prediction failed")]
    PredictionFailed,

    #[error("Classifier produced unusable output: {0}")]
    MalformedOutput(String),
}

impl From<AdapterError> for PredictError {
    fn from(_: AdapterError) -> Self {
        // Process-level failures are not distinguished further to callers.
        PredictError::PredictionFailed
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, PredictError>;
