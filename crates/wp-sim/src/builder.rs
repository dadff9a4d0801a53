//! Fluent builder for constructing a [`NavSim`].

use wp_core::{MarkerId, NavConfig};
use wp_graph::{Graph, PathFinder};
use wp_motion::{FollowerStore, RouteSpawner};

use crate::{NavSim, SimError, SimResult};

/// Fluent builder for [`NavSim<P>`].
///
/// # Required inputs
///
/// - [`NavConfig`] — tick duration, follower speed, spawn interval, …
/// - [`Graph`] — from [`wp_graph::GraphBuilder`]
/// - `P: PathFinder` — the routing algorithm (e.g. [`wp_graph::DijkstraPathFinder`])
///
/// # Optional inputs
///
/// | Method           | Default                                    |
/// |------------------|--------------------------------------------|
/// | `.route(a, b)`   | No route; the spawner idles until one is requested |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = NavSimBuilder::new(config, graph, DijkstraPathFinder)
///     .route(entrance, library)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct NavSimBuilder<P: PathFinder> {
    config: NavConfig,
    graph:  Graph,
    finder: P,
    route:  Option<(MarkerId, MarkerId)>,
}

impl<P: PathFinder> NavSimBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: NavConfig, graph: Graph, finder: P) -> Self {
        Self { config, graph, finder, route: None }
    }

    /// Request the route `from → to` as part of [`build`](Self::build).
    ///
    /// Its first follower is due at tick 0.
    pub fn route(mut self, from: MarkerId, to: MarkerId) -> Self {
        self.route = Some((from, to));
        self
    }

    /// Validate the configuration and return a ready-to-run [`NavSim`].
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for an invalid [`NavConfig`];
    /// [`SimError::Routing`] if the requested route cannot be found.
    pub fn build(self) -> SimResult<NavSim<P>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut sim = NavSim {
            clock:     self.config.make_clock(),
            spawner:   RouteSpawner::idle(&self.config),
            config:    self.config,
            graph:     self.graph,
            finder:    self.finder,
            route:     None,
            followers: FollowerStore::new(),
        };
        if let Some((from, to)) = self.route {
            sim.request_route(from, to)?;
        }
        Ok(sim)
    }
}
