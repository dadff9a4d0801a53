//! Tests for the campus demo's trace output.

#[cfg(test)]
mod trace_tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use wp_core::{FollowerId, MarkerId, Tick, Vec3};
    use wp_graph::Route;
    use wp_motion::RouteFollower;
    use wp_sim::NavObserver;

    use crate::trace::CsvTrace;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn spawn_is_stamped_at_tick_start_and_move_at_tick_end() {
        let dir = tmp();
        let path = dir.path().join("trace.csv");
        let route = Arc::new(Route::from_waypoints([
            (MarkerId(0), Vec3::new(0.0, 0.0, 0.0)),
            (MarkerId(1), Vec3::new(1.0, 0.0, 0.0)),
        ]));
        let follower = RouteFollower::new(FollowerId(0), route, 1.0, 0.01);

        let mut trace = CsvTrace::new(&path, 0.25).unwrap();
        trace.on_spawn(Tick(2), &follower);
        trace.on_follower_moved(Tick(2), FollowerId(0), Vec3::new(0.25, 0.0, 0.0));
        trace.finish().unwrap();
        assert!(trace.take_error().is_none());
        assert_eq!(trace.rows(), 2);

        let rows = rows(&path);
        assert_eq!(&rows[0][1], "0.5000");
        assert_eq!(&rows[0][3], "spawn");
        assert_eq!(&rows[1][1], "0.7500");
        assert_eq!(&rows[1][3], "move");
    }

    #[test]
    fn arrival_shares_the_final_move_time_and_position() {
        let dir = tmp();
        let path = dir.path().join("trace.csv");

        let mut trace = CsvTrace::new(&path, 0.5).unwrap();
        trace.on_follower_moved(Tick(3), FollowerId(4), Vec3::new(2.0, 0.0, 1.0));
        trace.on_arrival(Tick(3), FollowerId(4));
        trace.finish().unwrap();
        assert_eq!(trace.arrivals(), 1);

        let rows = rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "3");
        assert_eq!(&rows[1][1], "2.0000");
        assert_eq!(&rows[1][2], "4");
        assert_eq!(&rows[1][3], "arrive");
        assert_eq!(&rows[1][4], "2");
        assert_eq!(&rows[1][6], "1");
    }
}
