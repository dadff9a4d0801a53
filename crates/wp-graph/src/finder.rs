//! Route-finding trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `wp-sim` calls route finding through the [`PathFinder`] trait, so
//! applications can swap in A* or a precomputed table without touching the
//! tick loop.  The default [`DijkstraPathFinder`] settles markers in order
//! of Euclidean path length from the source.
//!
//! # Search state
//!
//! Distances, predecessors and the visited set live in a [`SearchTree`]
//! owned by a single call, never on the markers.  Concurrent requests over
//! one `&Graph` therefore cannot interfere.

use tracing::debug;

use wp_core::MarkerId;

use crate::frontier::FrontierHeap;
use crate::{Graph, GraphError, GraphResult, Route};

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable route-finding engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one finder can serve batch
/// requests from Rayon workers (see [`crate::find_routes`]).
pub trait PathFinder: Send + Sync {
    /// Compute the shortest route from `from` to `to`.
    ///
    /// `from == to` yields a one-marker route of length 0.  An unreachable
    /// destination yields [`GraphError::NotFound`], never a partial route.
    fn find_route(&self, graph: &Graph, from: MarkerId, to: MarkerId) -> GraphResult<Route>;
}

// ── SearchTree ────────────────────────────────────────────────────────────────

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Entries taken off the frontier.
    pub pops: usize,
    /// Popped entries discarded because their marker was already settled.
    pub stale_pops: usize,
    /// Markers whose distance became final.
    pub settled: usize,
    /// Successful decrease-key updates.
    pub relaxations: usize,
}

/// Per-marker tentative distance and predecessor produced by one search.
#[derive(Debug, Clone)]
pub struct SearchTree {
    source: MarkerId,
    dist: Vec<f32>,
    prev: Vec<MarkerId>,
    settled: Vec<bool>,
    stats: SearchStats,
}

impl SearchTree {
    pub fn source(&self) -> MarkerId {
        self.source
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// `true` once `id`'s shortest distance is final.
    pub fn is_settled(&self, id: MarkerId) -> bool {
        self.settled.get(id.index()).copied().unwrap_or(false)
    }

    /// Final shortest distance to `id`, or `None` if it was not settled.
    pub fn distance(&self, id: MarkerId) -> Option<f32> {
        self.is_settled(id).then(|| self.dist[id.index()])
    }

    /// Best distance seen so far (`f32::INFINITY` if never reached).
    pub fn tentative_distance(&self, id: MarkerId) -> f32 {
        self.dist.get(id.index()).copied().unwrap_or(f32::INFINITY)
    }

    pub fn predecessor(&self, id: MarkerId) -> Option<MarkerId> {
        self.prev
            .get(id.index())
            .copied()
            .filter(|p| p.is_valid())
    }

    /// Walk predecessors back from `dest` and return the route from the
    /// search source.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidMarker`] if `dest` is not in `graph`;
    /// [`GraphError::NotFound`] if `dest` was never settled.
    pub fn route_to(&self, graph: &Graph, dest: MarkerId) -> GraphResult<Route> {
        if !graph.contains(dest) || dest.index() >= self.dist.len() {
            return Err(GraphError::InvalidMarker(dest));
        }
        if !self.is_settled(dest) {
            return Err(GraphError::NotFound { from: self.source, to: dest });
        }

        let mut markers = Vec::new();
        let mut cur = dest;
        loop {
            markers.push(cur);
            match self.predecessor(cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        markers.reverse();
        debug_assert_eq!(markers.first(), Some(&self.source));

        let points = markers
            .iter()
            .map(|&m| graph.markers()[m.index()].position)
            .collect();
        Ok(Route::from_parts(markers, points, self.dist[dest.index()]))
    }
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the marker graph with an indexed binary
/// min-heap frontier.
///
/// Ties: a neighbor's predecessor only changes on a strictly shorter
/// candidate, and equal frontier keys pop lowest `MarkerId` first.  Results
/// are therefore fully deterministic for a given graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPathFinder;

impl DijkstraPathFinder {
    /// Run the search from `source`.
    ///
    /// With `stop_at = Some(dest)` the loop ends as soon as `dest` is
    /// settled; with `None` it settles every reachable marker.
    pub fn search(
        &self,
        graph: &Graph,
        source: MarkerId,
        stop_at: Option<MarkerId>,
    ) -> GraphResult<SearchTree> {
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        if !graph.contains(source) {
            return Err(GraphError::InvalidMarker(source));
        }
        if let Some(dest) = stop_at.filter(|&d| !graph.contains(d)) {
            return Err(GraphError::InvalidMarker(dest));
        }

        let markers = graph.markers();
        let n = markers.len();
        let mut dist = vec![f32::INFINITY; n];
        let mut prev = vec![MarkerId::INVALID; n];
        let mut settled = vec![false; n];
        let mut stats = SearchStats::default();

        dist[source.index()] = 0.0;
        let mut frontier = FrontierHeap::with_all_markers(&dist);

        while let Some(current) = frontier.pop(&dist) {
            stats.pops += 1;
            if settled[current.index()] {
                stats.stale_pops += 1;
                continue;
            }

            let base = dist[current.index()];
            // Everything still queued is unreachable from the source.
            if base == f32::INFINITY {
                break;
            }

            settled[current.index()] = true;
            stats.settled += 1;
            if stop_at == Some(current) {
                break;
            }

            let origin = markers[current.index()].position;
            for &neighbor in &markers[current.index()].neighbors {
                if settled[neighbor.index()] {
                    continue;
                }
                // Saturate: a finite path too long for f32 is still a path.
                let candidate =
                    (base + origin.distance(markers[neighbor.index()].position)).min(f32::MAX);
                if candidate < dist[neighbor.index()] {
                    dist[neighbor.index()] = candidate;
                    prev[neighbor.index()] = current;
                    frontier.decrease_key(neighbor, &dist);
                    stats.relaxations += 1;
                }
            }
        }

        debug!(
            %source,
            settled = stats.settled,
            pops = stats.pops,
            relaxations = stats.relaxations,
            "dijkstra search finished"
        );

        Ok(SearchTree { source, dist, prev, settled, stats })
    }
}

impl PathFinder for DijkstraPathFinder {
    fn find_route(&self, graph: &Graph, from: MarkerId, to: MarkerId) -> GraphResult<Route> {
        let tree = self.search(graph, from, Some(to))?;
        let route = tree.route_to(graph, to);
        match &route {
            Ok(r) => debug!(%from, %to, waypoints = r.len(), distance = r.total_distance(), "route found"),
            Err(e) => debug!(%from, %to, error = %e, "route not found"),
        }
        route
    }
}
