//! `wp-core` — foundational types for the `waypath` routing engine.
//!
//! This crate is a dependency of every other `wp-*` crate.  It has no
//! `wp-*` dependencies and a single required external one (`thiserror`),
//! plus optional `serde`.
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `MarkerId`, `FollowerId`                              |
//! | [`geo`]     | `Vec3`, Euclidean distance, `move_towards`            |
//! | [`time`]    | `Tick`, `SimClock`                                    |
//! | [`config`]  | `NavConfig` and its defaults                          |
//! | [`error`]   | `WpError`, `WpResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::NavConfig;
pub use error::{WpError, WpResult};
pub use geo::Vec3;
pub use ids::{FollowerId, MarkerId};
pub use time::{SimClock, Tick};
