//! Periodic follower spawner.
//!
//! The spawner is polled by the tick loop with the current simulated time
//! and hands back the followers that became due since the last poll.  It
//! never blocks; between spawns it is simply not due.

use std::sync::Arc;

use tracing::{debug, warn};

use wp_core::config::DEFAULT_SPAWN_INTERVAL_SECS;
use wp_core::{FollowerId, NavConfig};
use wp_graph::Route;

use crate::RouteFollower;

/// Spawns a [`RouteFollower`] at the route's first waypoint once per
/// interval until stopped.
///
/// The first follower is due at the moment the route is installed; after
/// that one per `interval_secs`.  If a poll spans several intervals, one
/// follower is produced per elapsed interval.
#[derive(Debug)]
pub struct RouteSpawner {
    route:           Arc<Route>,
    interval_secs:   f64,
    speed:           f32,
    arrival_epsilon: f32,
    /// Simulated time at which the next follower is due.
    next_due_secs:   f64,
    next_id:         u64,
    running:         bool,
    /// Set once the empty-route warning has been logged for this route.
    warned_empty:    bool,
}

impl RouteSpawner {
    /// A running spawner for `route`, first spawn due at `start_secs`.
    ///
    /// A non-positive interval falls back to the default so the poll loop
    /// always terminates; `NavConfig::validate` rejects such configs anyway.
    pub fn new(route: Arc<Route>, config: &NavConfig, start_secs: f64) -> Self {
        let interval = config.spawn_interval_secs;
        let interval_secs = if interval.is_finite() && interval > 0.0 {
            interval as f64
        } else {
            warn!(interval, "invalid spawn interval, using default");
            DEFAULT_SPAWN_INTERVAL_SECS as f64
        };
        Self {
            route,
            interval_secs,
            speed:           config.follower_speed,
            arrival_epsilon: config.arrival_epsilon,
            next_due_secs:   start_secs,
            next_id:         0,
            running:         true,
            warned_empty:    false,
        }
    }

    /// A spawner with no route yet.  It keeps time but spawns nothing until
    /// [`set_route`](Self::set_route) is called.
    pub fn idle(config: &NavConfig) -> Self {
        let mut spawner = Self::new(Arc::new(Route::empty()), config, 0.0);
        spawner.warned_empty = true;
        spawner
    }

    /// The route future followers will walk.
    #[inline]
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total followers spawned so far.
    #[inline]
    pub fn spawned_count(&self) -> u64 {
        self.next_id
    }

    #[inline]
    pub fn next_due_secs(&self) -> f64 {
        self.next_due_secs
    }

    /// Swap in a freshly computed route and restart the cadence at `now_secs`
    /// so its first follower appears immediately.
    ///
    /// Followers already spawned keep the route they were given.
    pub fn set_route(&mut self, route: Arc<Route>, now_secs: f64) {
        self.route = route;
        self.next_due_secs = now_secs;
        self.warned_empty = false;
    }

    /// Stop spawning.  Polls return nothing until [`resume`](Self::resume).
    pub fn stop(&mut self) {
        if self.running {
            debug!(spawned = self.next_id, "spawner stopped");
        }
        self.running = false;
    }

    /// Restart spawning with the next follower due at `now_secs`.
    pub fn resume(&mut self, now_secs: f64) {
        self.running = true;
        self.next_due_secs = now_secs;
    }

    /// Return every follower that fell due at or before `now_secs`.
    ///
    /// A non-finite `now_secs` spawns nothing.
    pub fn poll(&mut self, now_secs: f64) -> Vec<RouteFollower> {
        let mut spawned = Vec::new();
        if !self.running || !now_secs.is_finite() {
            return spawned;
        }

        while self.next_due_secs <= now_secs {
            self.next_due_secs += self.interval_secs;
            if self.route.is_empty() {
                if !self.warned_empty {
                    warn!("spawner has an empty route; no followers will be spawned");
                    self.warned_empty = true;
                }
                continue;
            }
            let id = FollowerId(self.next_id);
            self.next_id += 1;
            debug!(%id, at_secs = now_secs, "spawning follower");
            spawned.push(RouteFollower::new(
                id,
                Arc::clone(&self.route),
                self.speed,
                self.arrival_epsilon,
            ));
        }
        spawned
    }
}
