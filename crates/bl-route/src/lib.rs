//! `bl-route` — from a raw routing response to a per-node time series.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`wire`]      | `RouteResponse`, `Route`, `RouteLeg`, `Annotation`        |
//! | [`request`]   | `RouteRequest` (routing-service URL rendering)            |
//! | [`flatten`]   | `flatten_route`: legs/steps → ordered `RouteNode`s        |
//! | [`table`]     | `RouteNode`, `NodeTable`                                  |
//! | [`reconcile`] | `SpeedLimit`, `SpeedLimitTags`, `reconcile_speeds`        |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                            |
//!
//! # Pipeline (summary)
//!
//! ```text
//! RouteResponse ──flatten_route──▶ NodeTable ──reconcile_speeds──▶ NodeTable
//!                                   (route speeds)                (capped speeds)
//! ```
//!
//! The table is rebuilt from scratch for every lookup.  Reconciliation always
//! starts from the speeds reported by the routing service, so it can be re-run
//! with a different cap without re-fetching the route.

pub mod error;
pub mod flatten;
pub mod reconcile;
pub mod request;
pub mod table;
pub mod wire;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use flatten::flatten_route;
pub use reconcile::{SpeedLimit, SpeedLimitTags, reconcile_speeds};
pub use request::RouteRequest;
pub use table::{NodeTable, RouteNode};
pub use wire::{Annotation, Route, RouteLeg, RouteResponse, RouteStep, StepGeometry};
