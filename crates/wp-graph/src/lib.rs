//! `wp-graph` — waypoint graph, spatial indexing, and route finding.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`graph`]    | `Marker`, `Graph` (markers + R-tree), `GraphBuilder`, `GraphEdge` |
//! | [`finder`]   | `PathFinder` trait, `DijkstraPathFinder`, `SearchTree`      |
//! | [`route`]    | `Route`                                                     |
//! | [`batch`]    | `RouteRequest`, `find_routes`                               |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | `find_routes` runs requests on Rayon's thread pool.        |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.         |

pub mod batch;
pub mod error;
pub mod finder;
pub mod graph;
pub mod route;

mod frontier;


pub use batch::{find_routes, RouteRequest};
pub use error::{GraphError, GraphResult};
pub use finder::{DijkstraPathFinder, PathFinder, SearchStats, SearchTree};
pub use graph::{Graph, GraphBuilder, GraphEdge, Marker};
pub use route::Route;
