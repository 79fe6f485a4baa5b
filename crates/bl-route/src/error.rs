//! Route-subsystem error type.

use thiserror::Error;

use bl_core::NodeId;

/// Errors produced by `bl-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("routing service returned {code}: {message}")]
    Service { code: String, message: String },

    #[error("routing response contains no route")]
    NoRoute,

    #[error("unparseable speed limit {tag:?} at node {node}")]
    SpeedLimitParse { node: NodeId, tag: String },

    #[error("routing response JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
