//! Graph and routing error type.

use thiserror::Error;

use wp_core::MarkerId;

/// Errors produced by `wp-graph`.
///
/// [`GraphError::NotFound`] is an ordinary outcome (the destination lives in
/// another component); callers should surface it to the user rather than
/// treat it as fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("graph has no markers")]
    EmptyGraph,

    #[error("marker {0} is not part of the graph")]
    InvalidMarker(MarkerId),

    #[error("no route from {from} to {to}")]
    NotFound { from: MarkerId, to: MarkerId },

    #[error("marker {0} lists itself as a neighbor")]
    SelfLink(MarkerId),

    #[error("marker {marker} lists unknown neighbor {neighbor}")]
    DanglingNeighbor { marker: MarkerId, neighbor: MarkerId },

    #[error("link {from} -> {to} is too long to measure")]
    LinkTooLong { from: MarkerId, to: MarkerId },

    #[error("marker {0} has a non-finite position")]
    InvalidPosition(MarkerId),
}

pub type GraphResult<T> = Result<T, GraphError>;
