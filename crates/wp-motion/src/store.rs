//! The `FollowerStore` — every live follower in the simulation.

use wp_core::{FollowerId, Vec3};

use crate::{RouteFollower, TickOutcome};

/// Owns the live followers in spawn order.
///
/// Followers are ticked together and removed by [`reap`](Self::reap) once
/// they are `Done`, which is the point where a renderer should drop them.
#[derive(Debug, Default)]
pub struct FollowerStore {
    followers: Vec<RouteFollower>,
}

impl FollowerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, follower: RouteFollower) {
        self.followers.push(follower);
    }

    pub fn len(&self) -> usize {
        self.followers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }

    pub fn get(&self, id: FollowerId) -> Option<&RouteFollower> {
        self.followers.iter().find(|f| f.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteFollower> {
        self.followers.iter()
    }

    /// Advance every follower by `dt`, reporting each outcome to `on_tick`.
    pub fn tick_all<F>(&mut self, dt: f32, mut on_tick: F)
    where
        F: FnMut(&RouteFollower, TickOutcome),
    {
        for follower in &mut self.followers {
            let outcome = follower.tick(dt);
            on_tick(follower, outcome);
        }
    }

    /// Remove finished followers and return their ids in spawn order.
    pub fn reap(&mut self) -> Vec<FollowerId> {
        let mut finished = Vec::new();
        self.followers.retain(|f| {
            if f.is_done() {
                finished.push(f.id());
                false
            } else {
                true
            }
        });
        finished
    }

    /// Current position of every live follower, for the renderer.
    pub fn positions(&self) -> Vec<(FollowerId, Vec3)> {
        self.followers.iter().map(|f| (f.id(), f.position())).collect()
    }

    pub fn clear(&mut self) {
        self.followers.clear();
    }
}
