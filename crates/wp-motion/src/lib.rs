//! `wp-motion` — followers that animate along a computed route.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`follower`] | `RouteFollower`, `FollowerState`, `TickOutcome`            |
//! | [`spawner`]  | `RouteSpawner` — one follower per interval until stopped   |
//! | [`store`]    | `FollowerStore` — live followers, batch tick, reaping      |
//!
//! # Movement model
//!
//! 1. The spawner is polled every tick with the simulated time and yields
//!    followers placed on the route's first waypoint.
//! 2. Each tick a follower moves `speed * dt` toward its next waypoint,
//!    clamped so it never overshoots.
//! 3. Within `arrival_epsilon` of a waypoint it turns toward the next one;
//!    at the last waypoint it becomes `Done` and is reaped from the store.
//!
//! The route is shared as `Arc<Route>` and never mutated, so all followers
//! spawned from one path computation read the same waypoints.

pub mod follower;
pub mod spawner;
pub mod store;

#[cfg(test)]
mod tests;

pub use follower::{FollowerState, RouteFollower, TickOutcome};
pub use spawner::RouteSpawner;
pub use store::FollowerStore;
