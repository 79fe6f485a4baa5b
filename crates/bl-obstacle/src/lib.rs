//! `bl-obstacle` — from a geometry-service response to per-node obstruction.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`wire`]      | `OverpassElement`, `OverpassWay`, `OverpassCount`          |
//! | [`query`]     | `ObstacleQuery` (even/odd node partition, query text)      |
//! | [`response`]  | `ObstacleResponse::split`, count-driven grouping           |
//! | [`dataset`]   | `AttributeDataset`, `ObstacleAttributes`                   |
//! | [`matcher`]   | `Obstacle`, `ObstacleKind`, `ObstacleMatch`, `match_obstacles` |
//! | [`aggregate`] | `Obstruction`, `ObstructionTable`, `aggregate_obstructions`|
//! | [`error`]     | `ObstacleError`, `ObstacleResult<T>`                       |
//!
//! # Pipeline (summary)
//!
//! ```text
//! elements ──split──▶ route ways ──speed_limit_tags──▶ SpeedLimitTags
//!                  ├─▶ tunnels ─┐
//!                  └─▶ bridges ─┴─(+ AttributeDataset)──▶ Obstacles
//! Obstacles + NodeTable ──match_obstacles──▶ ObstacleMatches
//! ObstacleMatches + NodeTable ──aggregate_obstructions──▶ ObstructionTable
//! ```

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod matcher;
pub mod query;
pub mod response;
pub mod wire;


pub use aggregate::{Obstruction, ObstructionTable, WidthSource, aggregate_obstructions, resolve_width};
pub use dataset::{AttributeDataset, ObstacleAttributes};
pub use error::{ObstacleError, ObstacleResult};
pub use matcher::{Obstacle, ObstacleKind, ObstacleMatch, match_obstacles, nearest_node};
pub use query::ObstacleQuery;
pub use response::{ObstacleResponse, speed_limit_tags};
pub use wire::{OverpassCount, OverpassElement, OverpassWay, WayPoint};
