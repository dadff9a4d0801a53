//! Unit tests for wp-motion.

use std::sync::Arc;

use wp_core::{FollowerId, MarkerId, NavConfig, Vec3};
use wp_graph::Route;

use crate::{FollowerState, FollowerStore, RouteFollower, RouteSpawner, TickOutcome};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A(0,0,0) → B(1,0,0) → C(2,0,0).
fn line_route() -> Arc<Route> {
    Arc::new(Route::from_waypoints([
        (MarkerId(0), Vec3::new(0.0, 0.0, 0.0)),
        (MarkerId(1), Vec3::new(1.0, 0.0, 0.0)),
        (MarkerId(2), Vec3::new(2.0, 0.0, 0.0)),
    ]))
}

fn follower(route: Arc<Route>, speed: f32) -> RouteFollower {
    RouteFollower::new(FollowerId(0), route, speed, 0.01)
}

/// Tick until `Arrived`, returning the number of ticks taken.
fn ticks_to_arrive(f: &mut RouteFollower, dt: f32, limit: usize) -> usize {
    for n in 1..=limit {
        if f.tick(dt) == TickOutcome::Arrived {
            return n;
        }
    }
    panic!("follower did not arrive within {limit} ticks");
}

fn config(interval: f32) -> NavConfig {
    NavConfig { spawn_interval_secs: interval, follower_speed: 1.0, ..NavConfig::default() }
}

// ── RouteFollower ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod follower_tests {
    use super::*;

    #[test]
    fn starts_traveling_at_first_waypoint() {
        let f = follower(line_route(), 1.0);
        assert_eq!(f.state(), FollowerState::Traveling { segment: 0 });
        assert_eq!(f.position(), Vec3::ZERO);
        assert_eq!(f.target(), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(f.progress(), 0.0);
    }

    #[test]
    fn unit_line_takes_two_seconds_at_unit_speed() {
        let mut f = follower(line_route(), 1.0);
        let dt = 0.25;
        let ticks = ticks_to_arrive(&mut f, dt, 100);
        assert_eq!(ticks as f32 * dt, 2.0);
        assert!(f.is_done());
        assert_eq!(f.position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(f.progress(), 1.0);
    }

    #[test]
    fn frame_rate_dt_arrives_within_one_frame_of_two_seconds() {
        let mut f = follower(line_route(), 1.0);
        let dt = 1.0 / 60.0;
        let ticks = ticks_to_arrive(&mut f, dt, 1_000);
        let elapsed = ticks as f32 * dt;
        assert!((elapsed - 2.0).abs() <= dt + 1e-4, "arrived after {elapsed} s");
    }

    #[test]
    fn reports_intermediate_waypoint() {
        let mut f = follower(line_route(), 1.0);
        let outcomes: Vec<_> = (0..4).map(|_| f.tick(0.25)).collect();
        assert_eq!(outcomes[..3], [TickOutcome::Moved; 3]);
        assert_eq!(outcomes[3], TickOutcome::ReachedWaypoint { index: 1 });
        assert_eq!(f.segment(), Some(1));
        assert!((f.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn large_step_is_clamped_at_each_waypoint() {
        let mut f = follower(line_route(), 10.0);
        assert_eq!(f.tick(1.0), TickOutcome::ReachedWaypoint { index: 1 });
        assert_eq!(f.position(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(f.tick(1.0), TickOutcome::Arrived);
        assert_eq!(f.position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(f.traveled(), 2.0);
    }

    #[test]
    fn done_is_terminal() {
        let mut f = follower(line_route(), 100.0);
        f.tick(1.0);
        f.tick(1.0);
        assert!(f.is_done());
        assert_eq!(f.tick(1.0), TickOutcome::Idle);
        assert_eq!(f.position(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn empty_route_is_inert() {
        let mut f = follower(Arc::new(Route::empty()), 1.0);
        assert_eq!(f.state(), FollowerState::Inert);
        for _ in 0..10 {
            assert_eq!(f.tick(0.1), TickOutcome::Idle);
        }
        assert!(!f.is_done());
        assert_eq!(f.target(), None);
    }

    #[test]
    fn single_waypoint_route_is_already_done() {
        let route = Arc::new(Route::from_waypoints([(MarkerId(3), Vec3::new(1.0, 2.0, 3.0))]));
        let f = follower(route, 1.0);
        assert!(f.is_done());
        assert_eq!(f.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn non_positive_or_nan_dt_is_ignored() {
        let mut f = follower(line_route(), 1.0);
        assert_eq!(f.tick(0.0), TickOutcome::Idle);
        assert_eq!(f.tick(-1.0), TickOutcome::Idle);
        assert_eq!(f.tick(f32::NAN), TickOutcome::Idle);
        assert_eq!(f.position(), Vec3::ZERO);
    }

    #[test]
    fn walks_a_computed_route() {
        use wp_graph::{DijkstraPathFinder, GraphBuilder, PathFinder};

        let mut b = GraphBuilder::new();
        let a = b.add_marker(Vec3::new(0.0, 0.0, 0.0), "A");
        let m = b.add_marker(Vec3::new(0.0, 0.0, 3.0), "M");
        let c = b.add_marker(Vec3::new(4.0, 0.0, 3.0), "C");
        b.link(a, m);
        b.link(m, c);
        let graph = b.build().unwrap();
        let route = Arc::new(DijkstraPathFinder.find_route(&graph, a, c).unwrap());
        assert_eq!(route.total_distance(), 7.0);

        let mut f = follower(route, 2.0);
        let ticks = ticks_to_arrive(&mut f, 0.5, 100);
        assert_eq!(ticks, 7);
        assert_eq!(f.position(), Vec3::new(4.0, 0.0, 3.0));
    }
}

// ── RouteSpawner ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawner_tests {
    use super::*;

    #[test]
    fn first_follower_is_due_immediately() {
        let mut s = RouteSpawner::new(line_route(), &config(1.0), 0.0);
        let spawned = s.poll(0.0);
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].id(), FollowerId(0));
        assert_eq!(spawned[0].position(), Vec3::ZERO);
        assert_eq!(spawned[0].speed(), 1.0);
    }

    #[test]
    fn one_follower_per_interval() {
        let mut s = RouteSpawner::new(line_route(), &config(1.0), 0.0);
        assert_eq!(s.poll(0.0).len(), 1);
        assert!(s.poll(0.5).is_empty());
        assert!(s.poll(0.99).is_empty());
        let due = s.poll(1.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id(), FollowerId(1));
        assert_eq!(s.spawned_count(), 2);
        assert_eq!(s.next_due_secs(), 2.0);
    }

    #[test]
    fn long_poll_catches_up_one_per_interval() {
        let mut s = RouteSpawner::new(line_route(), &config(1.0), 0.0);
        s.poll(0.0);
        let due = s.poll(3.5);
        let ids: Vec<_> = due.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![FollowerId(1), FollowerId(2), FollowerId(3)]);
    }

    #[test]
    fn followers_share_one_route() {
        let route = line_route();
        let mut s = RouteSpawner::new(Arc::clone(&route), &config(0.5), 0.0);
        let spawned = s.poll(1.0);
        assert_eq!(spawned.len(), 3);
        assert!(spawned.iter().all(|f| Arc::ptr_eq(f.route(), &route)));
        // test handle + spawner + three followers
        assert_eq!(Arc::strong_count(&route), 5);
    }

    #[test]
    fn stop_and_resume() {
        let mut s = RouteSpawner::new(line_route(), &config(1.0), 0.0);
        s.poll(0.0);
        s.stop();
        assert!(!s.is_running());
        assert!(s.poll(10.0).is_empty());
        s.resume(10.0);
        assert_eq!(s.poll(10.0).len(), 1);
    }

    #[test]
    fn new_route_applies_to_future_spawns_only() {
        let old = line_route();
        let mut s = RouteSpawner::new(Arc::clone(&old), &config(1.0), 0.0);
        let early = s.poll(0.0).remove(0);

        let new = Arc::new(Route::from_waypoints([
            (MarkerId(5), Vec3::new(0.0, 3.0, 0.0)),
            (MarkerId(6), Vec3::new(0.0, 4.0, 0.0)),
        ]));
        s.set_route(Arc::clone(&new), 0.25);
        let late = s.poll(0.25).remove(0);

        assert!(Arc::ptr_eq(early.route(), &old));
        assert!(Arc::ptr_eq(late.route(), &new));
        assert_eq!(late.position(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn idle_spawner_spawns_nothing() {
        let mut s = RouteSpawner::idle(&config(1.0));
        assert!(s.poll(5.0).is_empty());
        assert_eq!(s.spawned_count(), 0);
        s.set_route(line_route(), 5.0);
        assert_eq!(s.poll(5.0).len(), 1);
    }

    #[test]
    fn non_finite_time_spawns_nothing() {
        let mut s = RouteSpawner::new(line_route(), &config(1.0), 0.0);
        assert!(s.poll(f64::INFINITY).is_empty());
        assert!(s.poll(f64::NAN).is_empty());
        assert_eq!(s.next_due_secs(), 0.0);
        assert_eq!(s.poll(0.0).len(), 1);
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let mut s = RouteSpawner::new(line_route(), &config(0.0), 0.0);
        assert_eq!(s.poll(0.5).len(), 1);
        assert_eq!(s.next_due_secs(), 1.0);
    }
}

// ── FollowerStore ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn tick_all_reports_every_follower() {
        let mut store = FollowerStore::new();
        store.insert(RouteFollower::new(FollowerId(0), line_route(), 1.0, 0.01));
        store.insert(RouteFollower::new(FollowerId(1), line_route(), 1.0, 0.01));
        let mut seen = Vec::new();
        store.tick_all(0.5, |f, outcome| seen.push((f.id(), outcome)));
        assert_eq!(
            seen,
            vec![(FollowerId(0), TickOutcome::Moved), (FollowerId(1), TickOutcome::Moved)]
        );
        assert_eq!(
            store.positions(),
            vec![
                (FollowerId(0), Vec3::new(0.5, 0.0, 0.0)),
                (FollowerId(1), Vec3::new(0.5, 0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn reap_removes_only_finished() {
        let mut store = FollowerStore::new();
        store.insert(RouteFollower::new(FollowerId(0), line_route(), 100.0, 0.01));
        store.insert(RouteFollower::new(FollowerId(1), line_route(), 0.1, 0.01));
        store.insert(RouteFollower::new(FollowerId(2), Arc::new(Route::empty()), 1.0, 0.01));
        store.tick_all(1.0, |_, _| {});
        store.tick_all(1.0, |_, _| {});

        assert_eq!(store.reap(), vec![FollowerId(0)]);
        assert_eq!(store.len(), 2);
        assert!(store.get(FollowerId(0)).is_none());
        assert!(store.get(FollowerId(1)).is_some());
        assert_eq!(store.reap(), Vec::<FollowerId>::new());
    }
}
