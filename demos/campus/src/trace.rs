//! `CsvTrace` — records follower events to a CSV file.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use wp_core::{FollowerId, Tick, Vec3};
use wp_motion::RouteFollower;
use wp_sim::NavObserver;

/// A [`NavObserver`] writing one row per spawn, move, and arrival.
///
/// Errors from the writer are stored internally because `NavObserver`
/// methods have no return value.  Check [`take_error`](Self::take_error)
/// after the run.
pub struct CsvTrace {
    writer:             Writer<File>,
    tick_duration_secs: f32,
    rows:               usize,
    arrivals:           usize,
    last_position:      Vec3,
    last_error:         Option<csv::Error>,
}

impl CsvTrace {
    pub fn new(path: &Path, tick_duration_secs: f32) -> csv::Result<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["tick", "time_secs", "follower_id", "event", "x", "y", "z"])?;
        Ok(Self {
            writer,
            tick_duration_secs,
            rows:          0,
            arrivals:      0,
            last_position: Vec3::ZERO,
            last_error:    None,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn arrivals(&self) -> usize {
        self.arrivals
    }

    pub fn take_error(&mut self) -> Option<csv::Error> {
        self.last_error.take()
    }

    pub fn finish(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Simulated seconds at the start of `tick`.
    fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.tick_duration_secs as f64
    }

    fn record(&mut self, tick: Tick, secs: f64, id: FollowerId, event: &str, p: Vec3) {
        let result = self.writer.write_record(&[
            tick.0.to_string(),
            format!("{secs:.4}"),
            id.0.to_string(),
            event.to_owned(),
            p.x.to_string(),
            p.y.to_string(),
            p.z.to_string(),
        ]);
        match result {
            Ok(()) => self.rows += 1,
            // Keep only the first error.
            Err(e) if self.last_error.is_none() => self.last_error = Some(e),
            Err(_) => {}
        }
    }
}

impl NavObserver for CsvTrace {
    fn on_spawn(&mut self, tick: Tick, follower: &RouteFollower) {
        // Spawns happen at the start of the tick, before anyone moves.
        let secs = self.secs_at(tick);
        self.record(tick, secs, follower.id(), "spawn", follower.position());
    }

    fn on_follower_moved(&mut self, tick: Tick, id: FollowerId, position: Vec3) {
        self.last_position = position;
        // Moves land at the end of the tick.
        let secs = self.secs_at(tick + 1);
        self.record(tick, secs, id, "move", position);
    }

    fn on_arrival(&mut self, tick: Tick, id: FollowerId) {
        self.arrivals += 1;
        // Always preceded by the same follower's final move.
        let secs = self.secs_at(tick + 1);
        self.record(tick, secs, id, "arrive", self.last_position);
    }
}
