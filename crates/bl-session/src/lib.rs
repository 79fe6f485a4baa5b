//! `bl-session` — one interactive analysis, stage by stage.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`session`]  | `Session`, `RouteStage`, `ObstacleStage`                  |
//! | [`stage`]    | `StageStatus<T>`, `LookupTicket`                          |
//! | [`provider`] | `RouteProvider`, `GeometryProvider`, `AttributeProvider`  |
//! | [`error`]    | `SessionError`, `SessionResult<T>`                        |
//!
//! # Stages
//!
//! ```text
//! begin_route_lookup ─▶ route: Computing ─▶ Ready(RouteStage) | Failed
//!                                              │
//! begin_obstacle_lookup ─▶ obstacles: Computing ─▶ Ready(ObstacleStage) | Failed
//! ```
//!
//! Starting a new route lookup bumps the session generation and discards all
//! derived state.  Completions carrying an older [`LookupTicket`] are ignored.
//! A failed obstacle stage leaves a resolved route in place.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | *(default)* geometry query and attribute lookup run under `rayon::join` |

pub mod error;
pub mod provider;
pub mod session;
pub mod stage;


pub use error::{SessionError, SessionResult};
pub use provider::{AttributeProvider, GeometryProvider, RouteProvider};
pub use session::{ObstacleStage, RouteStage, Session};
pub use stage::{LookupTicket, StageStatus};
