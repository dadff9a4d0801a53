//! Simulation observer trait for rendering and data collection.

use wp_core::{FollowerId, Tick, Vec3};
use wp_motion::RouteFollower;

/// Callbacks invoked by [`NavSim`][crate::NavSim] at key points in the tick
/// loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — arrival counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl NavObserver for Arrivals {
///     fn on_arrival(&mut self, _tick: Tick, _id: FollowerId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait NavObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per follower the spawner produced this tick, before it
    /// takes its first step.
    fn on_spawn(&mut self, _tick: Tick, _follower: &RouteFollower) {}

    /// Called after a follower's position changed.  A renderer moves the
    /// follower's visual here.
    fn on_follower_moved(&mut self, _tick: Tick, _id: FollowerId, _position: Vec3) {}

    /// Called when a follower walks onto its final waypoint.
    ///
    /// A follower spawned on a one-marker route is already there and never
    /// reports an arrival; [`on_removed`](Self::on_removed) still fires.
    fn on_arrival(&mut self, _tick: Tick, _id: FollowerId) {}

    /// Called once for every finished follower as it leaves the store, in
    /// spawn order.  Every spawned follower ends here exactly once; a
    /// renderer drops the follower's visual here.
    fn on_removed(&mut self, _tick: Tick, _id: FollowerId) {}

    /// Called at the end of each tick.
    ///
    /// `live` is the number of followers still walking after reaping.
    fn on_tick_end(&mut self, _tick: Tick, _live: usize) {}

    /// Called once after the final tick of [`NavSim::run`][crate::NavSim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`NavObserver`] that does nothing.
pub struct NoopObserver;

impl NavObserver for NoopObserver {}
