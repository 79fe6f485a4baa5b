//! External collaborators, consumed through traits.
//!
//! Implementations must be `Send + Sync`: the geometry query and the
//! attribute lookup run concurrently against a shared session.

use bl_obstacle::{AttributeDataset, ObstacleQuery, ObstacleResponse, ObstacleResult};
use bl_route::{RouteRequest, RouteResponse, RouteResult};

/// Routing service.
pub trait RouteProvider: Send + Sync {
    fn fetch_route(&self, request: &RouteRequest) -> RouteResult<RouteResponse>;
}

/// Geometry (obstacle) query service.
pub trait GeometryProvider: Send + Sync {
    fn fetch_obstacles(&self, query: &ObstacleQuery) -> ObstacleResult<ObstacleResponse>;
}

/// Static bridge attribute dataset.
pub trait AttributeProvider: Send + Sync {
    fn load_attributes(&self) -> ObstacleResult<AttributeDataset>;
}
