//! Obstacle-subsystem error type.

use thiserror::Error;

/// Errors produced by `bl-obstacle`.
#[derive(Debug, Error)]
pub enum ObstacleError {
    #[error("malformed obstacle response: {0}")]
    MalformedResponse(String),

    #[error("obstacle JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ObstacleResult<T> = Result<T, ObstacleError>;
