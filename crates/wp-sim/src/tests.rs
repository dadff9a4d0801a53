//! Integration tests for wp-sim.

use std::sync::Arc;

use wp_core::{FollowerId, MarkerId, NavConfig, Tick, Vec3};
use wp_graph::{DijkstraPathFinder, Graph, GraphBuilder, GraphError};
use wp_motion::RouteFollower;

use crate::{NavObserver, NavSim, NavSimBuilder, NoopObserver, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Quarter-second ticks, unit speed, one spawn per second (every 4 ticks).
fn test_config(total_ticks: u64) -> NavConfig {
    NavConfig {
        tick_duration_secs:  0.25,
        total_ticks,
        follower_speed:      1.0,
        spawn_interval_secs: 1.0,
        arrival_epsilon:     0.01,
    }
}

/// A(0,0,0) ↔ B(1,0,0) ↔ C(2,0,0), plus an isolated D(9,9,0).
fn line_graph() -> (Graph, [MarkerId; 4]) {
    let mut b = GraphBuilder::new();
    let a = b.add_marker(Vec3::new(0.0, 0.0, 0.0), "A");
    let bb = b.add_marker(Vec3::new(1.0, 0.0, 0.0), "B");
    let c = b.add_marker(Vec3::new(2.0, 0.0, 0.0), "C");
    let d = b.add_marker(Vec3::new(9.0, 9.0, 0.0), "D");
    b.link(a, bb);
    b.link(bb, c);
    (b.build().unwrap(), [a, bb, c, d])
}

fn line_sim(total_ticks: u64) -> (NavSim<DijkstraPathFinder>, [MarkerId; 4]) {
    let (graph, ids) = line_graph();
    let sim = NavSimBuilder::new(test_config(total_ticks), graph, DijkstraPathFinder)
        .route(ids[0], ids[2])
        .build()
        .unwrap();
    (sim, ids)
}

#[derive(Default)]
struct Recorder {
    started:  Vec<Tick>,
    spawns:   Vec<(Tick, FollowerId)>,
    moves:    usize,
    arrivals: Vec<(Tick, FollowerId)>,
    removals: Vec<(Tick, FollowerId)>,
    live:     Vec<usize>,
    ended:    Option<Tick>,
}

impl NavObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.started.push(tick);
    }
    fn on_spawn(&mut self, tick: Tick, follower: &RouteFollower) {
        self.spawns.push((tick, follower.id()));
    }
    fn on_follower_moved(&mut self, _tick: Tick, _id: FollowerId, _position: Vec3) {
        self.moves += 1;
    }
    fn on_arrival(&mut self, tick: Tick, id: FollowerId) {
        self.arrivals.push((tick, id));
    }
    fn on_removed(&mut self, tick: Tick, id: FollowerId) {
        self.removals.push((tick, id));
    }
    fn on_tick_end(&mut self, _tick: Tick, live: usize) {
        self.live.push(live);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── NavSimBuilder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_without_route() {
        let (graph, _) = line_graph();
        let mut sim = NavSimBuilder::new(test_config(10), graph, DijkstraPathFinder)
            .build()
            .unwrap();
        assert!(sim.route.is_none());
        sim.run_ticks(10, &mut NoopObserver);
        assert_eq!(sim.follower_count(), 0);
        assert_eq!(sim.spawner.spawned_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (graph, _) = line_graph();
        let config = NavConfig { follower_speed: 0.0, ..test_config(10) };
        let result = NavSimBuilder::new(config, graph, DijkstraPathFinder).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn unreachable_initial_route_is_rejected() {
        let (graph, [a, _, _, d]) = line_graph();
        let result = NavSimBuilder::new(test_config(10), graph, DijkstraPathFinder)
            .route(a, d)
            .build();
        assert!(matches!(
            result,
            Err(SimError::Routing(GraphError::NotFound { from, to })) if from == a && to == d
        ));
    }

    #[test]
    fn initial_route_is_installed() {
        let (sim, [a, b, c, _]) = line_sim(10);
        let route = sim.route.as_ref().unwrap();
        assert_eq!(route.markers(), &[a, b, c]);
        assert!(Arc::ptr_eq(route, sim.spawner.route()));
    }
}

// ── Routing requests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing_tests {
    use super::*;

    #[test]
    fn failed_request_keeps_previous_route() {
        let (mut sim, [a, _, _, d]) = line_sim(10);
        let before = Arc::clone(sim.route.as_ref().unwrap());
        let err = sim.request_route(a, d).unwrap_err();
        assert!(matches!(err, SimError::Routing(GraphError::NotFound { .. })));
        assert!(Arc::ptr_eq(sim.route.as_ref().unwrap(), &before));
        assert!(Arc::ptr_eq(sim.spawner.route(), &before));
    }

    #[test]
    fn request_by_label() {
        let (mut sim, [a, b, _, _]) = line_sim(10);
        let route = sim.request_route_by_label("A", "B").unwrap();
        assert_eq!(route.markers(), &[a, b]);
        assert_eq!(route.total_distance(), 1.0);
    }

    #[test]
    fn unknown_label_errors() {
        let (mut sim, _) = line_sim(10);
        let err = sim.request_route_by_label("A", "Z").unwrap_err();
        assert!(matches!(err, SimError::UnknownLabel(ref l) if l == "Z"));
    }

    #[test]
    fn new_route_spawns_immediately_and_old_followers_keep_theirs() {
        let (mut sim, [_, b, c, _]) = line_sim(100);
        sim.run_ticks(2, &mut NoopObserver);
        let old = Arc::clone(sim.route.as_ref().unwrap());

        let new = sim.request_route(c, b).unwrap();
        let mut rec = Recorder::default();
        sim.step(&mut rec);

        assert_eq!(rec.spawns, vec![(Tick(2), FollowerId(1))]);
        let first = sim.followers.get(FollowerId(0)).unwrap();
        let second = sim.followers.get(FollowerId(1)).unwrap();
        assert!(Arc::ptr_eq(first.route(), &old));
        assert!(Arc::ptr_eq(second.route(), &new));
        assert_eq!(second.position(), Vec3::new(1.75, 0.0, 0.0));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop_tests {
    use super::*;

    #[test]
    fn follower_arrives_after_two_seconds_and_is_removed() {
        let (mut sim, _) = line_sim(100);
        let mut rec = Recorder::default();
        sim.run_ticks(8, &mut rec);

        // Spawned at t = 0, walks 2.0 units at 1.0/s: done on the 8th tick.
        assert_eq!(rec.arrivals, vec![(Tick(7), FollowerId(0))]);
        assert_eq!(rec.removals, rec.arrivals);
        assert_eq!(sim.clock.elapsed_secs(), 2.0);
        assert!(sim.followers.get(FollowerId(0)).is_none());
    }

    #[test]
    fn spawns_once_per_interval() {
        let (mut sim, _) = line_sim(100);
        let mut rec = Recorder::default();
        sim.run_ticks(8, &mut rec);

        assert_eq!(rec.spawns, vec![(Tick(0), FollowerId(0)), (Tick(4), FollowerId(1))]);
        // Follower 1 has had four quarter-second steps.
        assert_eq!(sim.positions(), vec![(FollowerId(1), Vec3::new(1.0, 0.0, 0.0))]);
        assert_eq!(rec.live, vec![1, 1, 1, 1, 2, 2, 2, 1]);
        assert_eq!(rec.moves, 8 + 4);
    }

    #[test]
    fn run_stops_at_total_ticks() {
        let (mut sim, _) = line_sim(10);
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(rec.started.len(), 10);
        assert_eq!(rec.ended, Some(Tick(10)));
        assert_eq!(sim.clock.current_tick, Tick(10));

        // A second run has nothing left to do.
        sim.run(&mut rec);
        assert_eq!(rec.started.len(), 10);
    }

    #[test]
    fn stopping_lets_live_followers_finish() {
        let (mut sim, _) = line_sim(100);
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.follower_count(), 2);

        sim.stop_spawning();
        let mut rec = Recorder::default();
        sim.run_ticks(20, &mut rec);
        assert!(rec.spawns.is_empty());
        assert_eq!(rec.arrivals.len(), 2);
        assert_eq!(sim.follower_count(), 0);
    }

    #[test]
    fn resume_spawns_at_once() {
        let (mut sim, _) = line_sim(100);
        sim.stop_spawning();
        sim.run_ticks(3, &mut NoopObserver);
        sim.resume_spawning();
        let mut rec = Recorder::default();
        sim.step(&mut rec);
        assert_eq!(rec.spawns.len(), 1);
        assert_eq!(rec.spawns[0].0, Tick(3));
    }

    #[test]
    fn trivial_route_followers_are_reaped_on_spawn_tick() {
        let (mut sim, [_, b, _, _]) = line_sim(100);
        sim.stop_spawning();
        sim.run_ticks(20, &mut NoopObserver);
        sim.resume_spawning();
        sim.request_route(b, b).unwrap();

        let mut rec = Recorder::default();
        sim.step(&mut rec);
        assert_eq!(rec.spawns, vec![(Tick(20), FollowerId(0))]);
        // Already at its destination: no movement and no arrival, but the
        // removal is still reported.
        assert_eq!(rec.moves, 0);
        assert!(rec.arrivals.is_empty());
        assert_eq!(rec.removals, vec![(Tick(20), FollowerId(0))]);
        assert_eq!(sim.follower_count(), 0);
    }

    #[test]
    fn every_trivial_spawn_is_removed_once() {
        let (graph, [a, _, _, _]) = line_graph();
        let mut sim = NavSimBuilder::new(test_config(100), graph, DijkstraPathFinder)
            .route(a, a)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(8, &mut rec);

        assert_eq!(rec.spawns, vec![(Tick(0), FollowerId(0)), (Tick(4), FollowerId(1))]);
        assert_eq!(rec.removals, rec.spawns);
        assert_eq!(rec.live, vec![0; 8]);
    }
}
