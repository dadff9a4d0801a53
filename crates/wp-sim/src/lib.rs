//! `wp-sim` — tick loop orchestrator for the waypath engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Spawn  — poll the RouteSpawner at clock.secs_at(tick); every due
//!              follower is placed on the route's first waypoint.
//!   ② Move   — each follower steps speed * tick_duration_secs toward its
//!              next waypoint (on_follower_moved / on_arrival).
//!   ③ Reap   — followers that reached the last waypoint are removed
//!              (on_removed).
//!   ④ Advance the clock.
//! ```
//!
//! A route is computed once per [`NavSim::request_route`] and shared by every
//! follower spawned until the next request.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Forwards to `wp-graph/parallel` for batch routing.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wp_core::NavConfig;
//! use wp_graph::DijkstraPathFinder;
//! use wp_sim::{NavSimBuilder, NoopObserver};
//!
//! let mut sim = NavSimBuilder::new(config, graph, DijkstraPathFinder)
//!     .route(from, to)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::NavSimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NavObserver, NoopObserver};
pub use sim::NavSim;
