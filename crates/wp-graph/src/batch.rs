//! Many route requests against one graph.
//!
//! With the `parallel` feature the requests fan out over Rayon's thread
//! pool.  Each request owns its own search state, so results are identical
//! to the sequential path and come back in request order.

use wp_core::MarkerId;

use crate::{Graph, GraphResult, PathFinder, Route};

/// One `(source, destination)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    pub from: MarkerId,
    pub to: MarkerId,
}

impl RouteRequest {
    pub fn new(from: MarkerId, to: MarkerId) -> Self {
        Self { from, to }
    }
}

/// Resolve every request, preserving order.  Failures are reported per
/// request; one `NotFound` does not abort the batch.
pub fn find_routes<P: PathFinder + ?Sized>(
    finder: &P,
    graph: &Graph,
    requests: &[RouteRequest],
) -> Vec<GraphResult<Route>> {
    #[cfg(not(feature = "parallel"))]
    {
        requests
            .iter()
            .map(|r| finder.find_route(graph, r.from, r.to))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        requests
            .par_iter()
            .map(|r| finder.find_route(graph, r.from, r.to))
            .collect()
    }
}
