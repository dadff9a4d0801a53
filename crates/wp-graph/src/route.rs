//! The ordered waypoint sequence handed to followers and renderers.

use wp_core::{MarkerId, Vec3};

use crate::Graph;

/// The result of a routing query: markers from source to destination, their
/// positions, and the total path length.
///
/// A route is immutable once built.  Followers share it through an
/// `Arc<Route>`, so a route outlives every follower spawned against it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    markers: Vec<MarkerId>,
    points: Vec<Vec3>,
    total_distance: f32,
}

impl Route {
    /// A route with no waypoints.  Never produced by a successful search;
    /// followers bound to it stay inert.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a route from explicit `(marker, position)` pairs, summing the
    /// segment lengths in order.
    pub fn from_waypoints(waypoints: impl IntoIterator<Item = (MarkerId, Vec3)>) -> Self {
        let (markers, points): (Vec<MarkerId>, Vec<Vec3>) = waypoints.into_iter().unzip();
        let total_distance = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        Self { markers, points, total_distance }
    }

    /// Internal constructor for search results: the total is the settled
    /// distance of the destination.
    pub(crate) fn from_parts(markers: Vec<MarkerId>, points: Vec<Vec3>, total_distance: f32) -> Self {
        debug_assert_eq!(markers.len(), points.len());
        Self { markers, points, total_distance }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// `true` if source and destination are the same marker.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.markers.len() == 1
    }

    #[inline]
    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn first(&self) -> Option<MarkerId> {
        self.markers.first().copied()
    }

    pub fn last(&self) -> Option<MarkerId> {
        self.markers.last().copied()
    }

    pub fn waypoint(&self, index: usize) -> Option<(MarkerId, Vec3)> {
        Some((*self.markers.get(index)?, *self.points.get(index)?))
    }

    /// Sum of segment lengths, source to destination.
    #[inline]
    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    pub fn segment_lengths(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.windows(2).map(|w| w[0].distance(w[1]))
    }

    /// Seconds a follower moving at `speed` needs to walk the whole route.
    pub fn travel_secs(&self, speed: f32) -> f32 {
        if speed <= 0.0 {
            return f32::INFINITY;
        }
        self.total_distance / speed
    }

    /// `true` if every consecutive pair is a neighbor link in `graph`.
    pub fn is_connected_in(&self, graph: &Graph) -> bool {
        self.markers.windows(2).all(|w| graph.is_linked(w[0], w[1]))
    }
}
