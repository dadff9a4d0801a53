//! A single animated entity walking a shared route.

use std::sync::Arc;

use tracing::{trace, warn};

use wp_core::{FollowerId, Vec3};
use wp_graph::Route;

/// Where a follower is in its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerState {
    /// Heading from waypoint `segment` to waypoint `segment + 1`.
    Traveling { segment: usize },
    /// Reached the final waypoint.  Terminal.
    Done,
    /// Bound to a route with no waypoints.  Every tick is a no-op.
    Inert,
}

/// What a single [`RouteFollower::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened (`Done`, `Inert`, or a non-positive step).
    Idle,
    /// Moved along the current segment.
    Moved,
    /// Arrived at intermediate waypoint `index` and turned toward the next.
    ReachedWaypoint { index: usize },
    /// Arrived at the final waypoint; the follower is now `Done`.
    Arrived,
}

impl TickOutcome {
    /// `true` if the follower's position changed this tick.
    #[inline]
    pub fn moved(self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}

/// Walks a [`Route`] at constant speed, one waypoint at a time.
///
/// The follower only reads the route.  Its cursor (segment index and
/// interpolated position) is private, so any number of followers can share
/// one `Arc<Route>` without locking.
#[derive(Debug, Clone)]
pub struct RouteFollower {
    id:              FollowerId,
    route:           Arc<Route>,
    position:        Vec3,
    speed:           f32,
    arrival_epsilon: f32,
    state:           FollowerState,
    traveled:        f32,
}

impl RouteFollower {
    /// Place a follower on the first waypoint of `route`.
    ///
    /// A one-waypoint route starts `Done`; an empty route starts `Inert`.
    pub fn new(id: FollowerId, route: Arc<Route>, speed: f32, arrival_epsilon: f32) -> Self {
        let (position, state) = match route.len() {
            0 => {
                warn!(%id, "follower bound to an empty route; it will stay inert");
                (Vec3::ZERO, FollowerState::Inert)
            }
            1 => (route.points()[0], FollowerState::Done),
            _ => (route.points()[0], FollowerState::Traveling { segment: 0 }),
        };
        Self { id, route, position, speed, arrival_epsilon, state, traveled: 0.0 }
    }

    #[inline]
    pub fn id(&self) -> FollowerId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn state(&self) -> FollowerState {
        self.state
    }

    #[inline]
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == FollowerState::Done
    }

    /// Index of the segment being walked, if traveling.
    pub fn segment(&self) -> Option<usize> {
        match self.state {
            FollowerState::Traveling { segment } => Some(segment),
            _ => None,
        }
    }

    /// The waypoint currently being approached.
    pub fn target(&self) -> Option<Vec3> {
        self.segment().and_then(|s| self.route.points().get(s + 1).copied())
    }

    /// Distance covered so far.
    #[inline]
    pub fn traveled(&self) -> f32 {
        self.traveled
    }

    /// Fraction of the route covered, in `[0.0, 1.0]`.
    ///
    /// `1.0` once `Done`; `0.0` for an inert follower.
    pub fn progress(&self) -> f32 {
        match self.state {
            FollowerState::Done => 1.0,
            FollowerState::Inert => 0.0,
            FollowerState::Traveling { .. } => {
                let total = self.route.total_distance();
                if total > 0.0 { (self.traveled / total).min(1.0) } else { 1.0 }
            }
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// Moves toward the next waypoint by `speed * dt`, never past it.  Once
    /// within `arrival_epsilon` of that waypoint the segment index advances;
    /// reaching the last waypoint ends the walk.  Leftover step length is
    /// not carried into the next segment.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let FollowerState::Traveling { segment } = self.state else {
            return TickOutcome::Idle;
        };
        let step = self.speed * dt;
        if !(step.is_finite() && step > 0.0) {
            return TickOutcome::Idle;
        }
        let Some(target) = self.route.points().get(segment + 1).copied() else {
            // Only reachable if the cursor and route disagree; stop rather than fault.
            warn!(id = %self.id, segment, "follower segment past end of route");
            self.state = FollowerState::Inert;
            return TickOutcome::Idle;
        };

        let next = self.position.move_towards(target, step);
        self.traveled += self.position.distance(next);
        self.position = next;
        trace!(id = %self.id, segment, position = %next, "follower moved");

        if next.distance(target) >= self.arrival_epsilon {
            return TickOutcome::Moved;
        }

        let reached = segment + 1;
        if reached >= self.route.len() - 1 {
            self.state = FollowerState::Done;
            TickOutcome::Arrived
        } else {
            self.state = FollowerState::Traveling { segment: reached };
            TickOutcome::ReachedWaypoint { index: reached }
        }
    }
}
