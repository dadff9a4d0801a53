//! Waypoint graph representation and builder.
//!
//! # Data layout
//!
//! Markers live in a single `Vec<Marker>` indexed by `MarkerId`, each
//! carrying its own ordered neighbor list.  No edge entities are stored:
//! the weight of a link is the Euclidean distance between its two markers,
//! computed whenever the router asks for it.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a 3-D position to the nearest `MarkerId`.
//! Used by callers to snap the user's current position to a source marker.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wp_core::{MarkerId, Vec3};

use crate::{GraphError, GraphResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct MarkerEntry {
    point: [f32; 3],
    id: MarkerId,
}

impl RTreeObject for MarkerEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for MarkerEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── Marker ────────────────────────────────────────────────────────────────────

/// A navigable waypoint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub id: MarkerId,
    pub position: Vec3,
    /// Human-facing name (room number, landmark).  May be empty.
    pub label: String,
    /// Directly reachable markers, in the order the graph author listed them.
    /// Never contains `id` itself.
    pub neighbors: Vec<MarkerId>,
}

/// A neighbor link viewed as an edge.  Produced on demand by
/// [`Graph::edges`]; the graph never stores these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub from: MarkerId,
    pub to: MarkerId,
    pub length: f32,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// The set of all markers plus the adjacency relation between them.
///
/// Immutable once built.  Do not construct directly; use [`GraphBuilder`].
pub struct Graph {
    markers: Vec<Marker>,
    spatial_idx: RTree<MarkerEntry>,
}

impl Graph {
    /// A graph with no markers.  Every route request against it fails with
    /// [`GraphError::EmptyGraph`].
    pub fn empty() -> Self {
        Self { markers: Vec::new(), spatial_idx: RTree::new() }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of directed neighbor listings (a symmetric link counts twice).
    pub fn link_count(&self) -> usize {
        self.markers.iter().map(|m| m.neighbors.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: MarkerId) -> bool {
        id.index() < self.markers.len()
    }

    #[inline]
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.index())
    }

    /// All markers, indexed by `MarkerId`.
    #[inline]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Neighbor list of `id`; empty for unknown markers.
    #[inline]
    pub fn neighbors(&self, id: MarkerId) -> &[MarkerId] {
        self.marker(id).map(|m| m.neighbors.as_slice()).unwrap_or(&[])
    }

    #[inline]
    pub fn position(&self, id: MarkerId) -> Option<Vec3> {
        self.marker(id).map(|m| m.position)
    }

    /// `true` if `b` appears in `a`'s neighbor list.
    pub fn is_linked(&self, a: MarkerId, b: MarkerId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Length of the link `a → b`, or `None` if `a` does not list `b`.
    pub fn edge_length(&self, a: MarkerId, b: MarkerId) -> Option<f32> {
        if !self.is_linked(a, b) {
            return None;
        }
        Some(self.markers[a.index()].position.distance(self.markers[b.index()].position))
    }

    /// Every directed neighbor listing as a [`GraphEdge`], grouped by source
    /// marker in id order.
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.markers.iter().flat_map(move |m| {
            m.neighbors.iter().map(move |&to| GraphEdge {
                from: m.id,
                to,
                length: m.position.distance(self.markers[to.index()].position),
            })
        })
    }

    /// First marker whose label equals `label`.
    pub fn find_by_label(&self, label: &str) -> Option<MarkerId> {
        self.markers.iter().find(|m| m.label == label).map(|m| m.id)
    }

    /// `true` if every link is listed from both ends.
    pub fn is_symmetric(&self) -> bool {
        self.markers
            .iter()
            .all(|m| m.neighbors.iter().all(|&n| self.is_linked(n, m.id)))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The marker closest to `pos`.  `None` only for an empty graph.
    pub fn nearest_marker(&self, pos: Vec3) -> Option<MarkerId> {
        self.spatial_idx.nearest_neighbor(&pos.to_array()).map(|e| e.id)
    }

    /// All markers within `radius` of `pos`, nearest first (ties by id).
    ///
    /// A negative or non-finite radius matches nothing.
    pub fn markers_within(&self, pos: Vec3, radius: f32) -> Vec<MarkerId> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Vec::new();
        }
        let query = pos.to_array();
        let mut hits: Vec<(f32, MarkerId)> = self
            .spatial_idx
            .locate_within_distance(query, radius * radius)
            .map(|e| (e.distance_2(&query), e.id))
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Markers and links may be added in any order; links are validated only at
/// `build()` time.
///
/// # Example
///
/// ```
/// use wp_core::Vec3;
/// use wp_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let lobby = b.add_marker(Vec3::new(0.0, 0.0, 0.0), "lobby");
/// let stairs = b.add_marker(Vec3::new(4.0, 0.0, 3.0), "stairs");
/// b.link(lobby, stairs);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.marker_count(), 2);
/// assert_eq!(graph.link_count(), 2); // listed from both ends
/// assert_eq!(graph.edge_length(lobby, stairs), Some(5.0));
/// ```
pub struct GraphBuilder {
    markers: Vec<(Vec3, String)>,
    links: Vec<(MarkerId, MarkerId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { markers: Vec::new(), links: Vec::new() }
    }

    pub fn with_capacity(markers: usize, links: usize) -> Self {
        Self {
            markers: Vec::with_capacity(markers),
            links: Vec::with_capacity(links),
        }
    }

    /// Add a marker and return its `MarkerId` (sequential from 0).
    pub fn add_marker(&mut self, position: Vec3, label: impl Into<String>) -> MarkerId {
        let id = MarkerId(self.markers.len() as u32);
        self.markers.push((position, label.into()));
        id
    }

    /// List `to` as a neighbor of `from` (one direction only).
    pub fn add_neighbor(&mut self, from: MarkerId, to: MarkerId) {
        self.links.push((from, to));
    }

    /// Convenience: list each marker as the other's neighbor.
    pub fn link(&mut self, a: MarkerId, b: MarkerId) {
        self.add_neighbor(a, b);
        self.add_neighbor(b, a);
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// Duplicate listings collapse to the first; neighbor order otherwise
    /// follows insertion order.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidPosition`] for a NaN/infinite coordinate.
    /// - [`GraphError::InvalidMarker`] if a link starts at an unknown marker.
    /// - [`GraphError::DanglingNeighbor`] if a link ends at an unknown marker.
    /// - [`GraphError::SelfLink`] if a marker would list itself.
    /// - [`GraphError::LinkTooLong`] if a link's length exceeds `f32::MAX`.
    pub fn build(self) -> GraphResult<Graph> {
        let count = self.markers.len();

        let mut markers: Vec<Marker> = Vec::with_capacity(count);
        for (i, (position, label)) in self.markers.into_iter().enumerate() {
            let id = MarkerId(i as u32);
            if !position.is_finite() {
                return Err(GraphError::InvalidPosition(id));
            }
            markers.push(Marker { id, position, label, neighbors: Vec::new() });
        }

        for (from, to) in self.links {
            if from.index() >= count {
                return Err(GraphError::InvalidMarker(from));
            }
            if to.index() >= count {
                return Err(GraphError::DanglingNeighbor { marker: from, neighbor: to });
            }
            if from == to {
                return Err(GraphError::SelfLink(from));
            }
            let length = markers[from.index()].position.distance(markers[to.index()].position);
            if !length.is_finite() {
                return Err(GraphError::LinkTooLong { from, to });
            }
            let list = &mut markers[from.index()].neighbors;
            if !list.contains(&to) {
                list.push(to);
            }
        }

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<MarkerEntry> = markers
            .iter()
            .map(|m| MarkerEntry { point: m.position.to_array(), id: m.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(Graph { markers, spatial_idx })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
