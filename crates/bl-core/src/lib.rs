//! `bl-core` — foundational types for the `bridgelink` route analysis.
//!
//! This crate is a dependency of every other `bl-*` crate.  It has no
//! `bl-*` dependencies and minimal external ones (`rand` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `WayId` (OpenStreetMap identifiers)         |
//! | [`geo`]         | `GeoPoint`, haversine distance, `BoundingBox`         |
//! | [`config`]      | `AnalysisConfig`                                      |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types and     |
//!           | enables JSON loading of `AnalysisConfig`.                  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::AnalysisConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, GeoPoint};
pub use ids::{NodeId, WayId};
pub use rng::SimRng;
