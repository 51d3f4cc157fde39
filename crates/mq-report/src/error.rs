//! Error types for rendering.

use thiserror::Error;

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a report.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for mq_common::Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Io(e) => mq_common::Error::Io(e),
            RenderError::Json(e) => mq_common::Error::Json(e),
            RenderError::InvalidConfig(msg) => mq_common::Error::Config(msg),
        }
    }
}
