use thiserror::Error;

use bl_core::CoreError;
use bl_obstacle::ObstacleError;
use bl_route::RouteError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(String),

    #[error("no resolved route; look up a route first")]
    RouteNotReady,

    #[error("route lookup failed: {0}")]
    Route(#[from] RouteError),

    #[error("obstacle lookup failed: {0}")]
    Obstacle(#[from] ObstacleError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SessionResult<T> = Result<T, SessionError>;
