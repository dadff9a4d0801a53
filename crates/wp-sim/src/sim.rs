//! The `NavSim` struct and its tick loop.

use std::sync::Arc;

use tracing::{debug, info};

use wp_core::{FollowerId, MarkerId, NavConfig, SimClock, Tick, Vec3};
use wp_graph::{Graph, PathFinder, Route};
use wp_motion::{FollowerStore, RouteSpawner, TickOutcome};

use crate::{NavObserver, SimError, SimResult};

// ── NavSim ────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `NavSim<P>` owns the waypoint graph, the route finder, and every live
/// follower, and drives this per-tick loop:
///
/// 1. **Spawn**: poll the [`RouteSpawner`] with the current simulated time
///    and insert the followers that fell due.
/// 2. **Move**: advance every follower by one tick duration.
/// 3. **Reap**: drop followers that reached their final waypoint and report
///    each through `on_removed`.
/// 4. **Advance** the clock.
///
/// Create via [`NavSimBuilder`][crate::NavSimBuilder].
pub struct NavSim<P: PathFinder> {
    /// Session configuration (tick duration, speed, spawn interval, …).
    pub config: NavConfig,

    /// Simulation clock — tracks the current tick and maps to seconds.
    pub clock: SimClock,

    /// The waypoint graph.  Immutable for the lifetime of the sim.
    pub graph: Graph,

    /// The route finder.  Called once per [`request_route`](Self::request_route).
    pub finder: P,

    /// The most recently installed route, if any.
    pub route: Option<Arc<Route>>,

    /// Produces followers on the current route.
    pub spawner: RouteSpawner,

    /// Live followers in spawn order.
    pub followers: FollowerStore,
}

impl<P: PathFinder> NavSim<P> {
    // ── Routing ───────────────────────────────────────────────────────────

    /// Compute the route from `from` to `to` and install it on the spawner.
    ///
    /// The first follower on the new route is due at the current tick.
    /// Followers already walking keep their old route.  On error nothing
    /// changes and the previous route stays installed.
    pub fn request_route(&mut self, from: MarkerId, to: MarkerId) -> SimResult<Arc<Route>> {
        let route = Arc::new(self.finder.find_route(&self.graph, from, to)?);
        info!(
            %from,
            %to,
            waypoints = route.len(),
            distance = route.total_distance(),
            tick = %self.clock.current_tick,
            "route installed"
        );
        self.spawner.set_route(Arc::clone(&route), self.clock.elapsed_secs());
        self.route = Some(Arc::clone(&route));
        Ok(route)
    }

    /// [`request_route`](Self::request_route) addressed by marker labels.
    pub fn request_route_by_label(&mut self, from: &str, to: &str) -> SimResult<Arc<Route>> {
        let from = self.resolve_label(from)?;
        let to = self.resolve_label(to)?;
        self.request_route(from, to)
    }

    fn resolve_label(&self, label: &str) -> SimResult<MarkerId> {
        self.graph
            .find_by_label(label)
            .ok_or_else(|| SimError::UnknownLabel(label.to_owned()))
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Stop producing followers.  Live followers keep walking.
    pub fn stop_spawning(&mut self) {
        self.spawner.stop();
    }

    /// Resume spawning; the next follower is due at the current tick.
    pub fn resume_spawning(&mut self) {
        self.spawner.resume(self.clock.elapsed_secs());
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Current position of every live follower, in spawn order.
    pub fn positions(&self) -> Vec<(FollowerId, Vec3)> {
        self.followers.positions()
    }

    pub fn follower_count(&self) -> usize {
        self.followers.len()
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, then call
    /// `on_sim_end`.
    pub fn run<O: NavObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: NavObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Process a single tick and advance the clock.
    pub fn step<O: NavObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer);
        observer.on_tick_end(now, self.followers.len());
        self.clock.advance();
    }

    fn process_tick<O: NavObserver>(&mut self, now: Tick, observer: &mut O) {
        // ── Phase 1: spawn ────────────────────────────────────────────────
        for follower in self.spawner.poll(self.clock.secs_at(now)) {
            observer.on_spawn(now, &follower);
            self.followers.insert(follower);
        }

        // ── Phase 2: move ─────────────────────────────────────────────────
        let dt = self.clock.tick_duration_secs;
        self.followers.tick_all(dt, |follower, outcome| {
            if outcome.moved() {
                observer.on_follower_moved(now, follower.id(), follower.position());
            }
            if outcome == TickOutcome::Arrived {
                observer.on_arrival(now, follower.id());
            }
        });

        // ── Phase 3: reap ─────────────────────────────────────────────────
        let finished = self.followers.reap();
        if !finished.is_empty() {
            debug!(tick = %now, count = finished.len(), "followers finished");
        }
        for id in finished {
            observer.on_removed(now, id);
        }
    }
}
