//! Navigation and animation configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the simulation builder.  Every field has a
//! default, so a partial file only overrides what it names.

use crate::{SimClock, Tick, WpError, WpResult};

/// Default follower speed in world units per second.
pub const DEFAULT_FOLLOWER_SPEED: f32 = 2.0;
/// Default delay between two follower spawns, in seconds.
pub const DEFAULT_SPAWN_INTERVAL_SECS: f32 = 1.0;
/// Distance under which a follower counts as having reached a waypoint.
pub const DEFAULT_ARRIVAL_EPSILON: f32 = 0.01;
/// One 60 Hz frame.
pub const DEFAULT_TICK_DURATION_SECS: f32 = 1.0 / 60.0;

/// Top-level configuration for a navigation session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Simulated seconds per tick.
    pub tick_duration_secs: f32,

    /// Ticks simulated by `NavSim::run`.  `0` means `run` returns at once;
    /// use `run_ticks` to drive an open-ended session.
    pub total_ticks: u64,

    /// Follower speed in world units per second.
    pub follower_speed: f32,

    /// Seconds between two follower spawns.
    pub spawn_interval_secs: f32,

    /// Waypoint arrival threshold in world units.
    pub arrival_epsilon: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:  DEFAULT_TICK_DURATION_SECS,
            total_ticks:         0,
            follower_speed:      DEFAULT_FOLLOWER_SPEED,
            spawn_interval_secs: DEFAULT_SPAWN_INTERVAL_SECS,
            arrival_epsilon:     DEFAULT_ARRIVAL_EPSILON,
        }
    }
}

impl NavConfig {
    /// Reject values that would stall or explode the tick loop.
    pub fn validate(&self) -> WpResult<()> {
        check_positive("tick_duration_secs", self.tick_duration_secs)?;
        check_positive("follower_speed", self.follower_speed)?;
        check_positive("spawn_interval_secs", self.spawn_interval_secs)?;
        check_positive("arrival_epsilon", self.arrival_epsilon)?;
        Ok(())
    }

    /// The tick at which `NavSim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}

fn check_positive(field: &str, value: f32) -> WpResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WpError::Config(format!("{field} must be positive and finite, got {value}")))
    }
}
