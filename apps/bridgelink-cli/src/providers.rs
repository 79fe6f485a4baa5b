//! Collaborators backed by recorded service responses on disk.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use bl_obstacle::{AttributeDataset, ObstacleQuery, ObstacleResponse, ObstacleResult};
use bl_route::{RouteRequest, RouteResponse, RouteResult};
use bl_session::{AttributeProvider, GeometryProvider, RouteProvider};

/// A saved routing-service response.
pub struct RouteFile(pub PathBuf);

impl RouteProvider for RouteFile {
    fn fetch_route(&self, request: &RouteRequest) -> RouteResult<RouteResponse> {
        log::debug!("answering {}→{} from {}", request.start, request.end, self.0.display());
        RouteResponse::from_json_reader(BufReader::new(File::open(&self.0)?))
    }
}

/// A saved geometry-service response.
pub struct GeometryFile(pub PathBuf);

impl GeometryProvider for GeometryFile {
    fn fetch_obstacles(&self, query: &ObstacleQuery) -> ObstacleResult<ObstacleResponse> {
        log::debug!(
            "answering obstacle query over {} nodes from {}",
            query.even_nodes.len() + query.odd_nodes.len(),
            self.0.display()
        );
        ObstacleResponse::from_json_reader(BufReader::new(File::open(&self.0)?))
    }
}

/// The bridge attribute dataset file.
pub struct AttributeFile(pub PathBuf);

impl AttributeProvider for AttributeFile {
    fn load_attributes(&self) -> ObstacleResult<AttributeDataset> {
        AttributeDataset::from_json_path(&self.0)
    }
}
