//! The network engine: one owned graph plus every query and mutation.
//!
//! Queries take `&self` and build their own scratch tables; mutations
//! take `&mut self`. Callers sharing a network between threads wrap it
//! in a single-writer lock.

use tracing::info;

use crate::domain::{NetworkError, StopId, Weight, WeightChannel};
use crate::graph::{BuildSummary, Route, StopDetail, TransitGraph};
use crate::loader::NetworkSpec;
use crate::planner::{
    Connectivity, EngineConfig, Itinerary, KBestSearch, ShortestPathTree, TransferRoute,
    TransferSearch, connectivity,
};

/// A transit network and the operations it answers.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    graph: TransitGraph,
    config: EngineConfig,
}

impl TransitNetwork {
    /// Create an empty network.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            graph: TransitGraph::new(config.max_stops),
            config,
        }
    }

    /// Create a network and build it from a loaded description.
    pub fn from_spec(spec: &NetworkSpec, config: EngineConfig) -> Result<Self, NetworkError> {
        let mut network = Self::new(config);
        network.build(spec.stop_count, &spec.routes)?;
        Ok(network)
    }

    /// Limits this network was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only access to the underlying graph.
    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    /// Resolve a raw id to a stop of this network.
    pub fn stop(&self, raw: u32) -> Result<StopId, NetworkError> {
        self.graph.stop(raw)
    }

    /// Replace the whole network.
    pub fn build(&mut self, stop_count: u32, routes: &[Route]) -> Result<BuildSummary, NetworkError> {
        let summary = self.graph.build(stop_count, routes)?;
        info!(
            stops = stop_count,
            routes = summary.routes,
            "network built"
        );
        Ok(summary)
    }

    /// Shortest path by physical distance.
    pub fn shortest_distance(&self, from: StopId, to: StopId) -> Result<Itinerary, NetworkError> {
        self.optimal(from, to, WeightChannel::Distance)
    }

    /// Cheapest path by fare.
    pub fn min_fare(&self, from: StopId, to: StopId) -> Result<Itinerary, NetworkError> {
        self.optimal(from, to, WeightChannel::Cost)
    }

    /// Lengths of the `k` shortest walks by distance, ascending.
    pub fn k_best_paths(&self, from: StopId, to: StopId, k: usize) -> Result<Vec<Weight>, NetworkError> {
        self.graph.check(from)?;
        self.graph.check(to)?;
        KBestSearch::new(&self.graph).run(from, to, k)
    }

    /// Path with the fewest transfers.
    pub fn min_transfers(&self, from: StopId, to: StopId) -> Result<TransferRoute, NetworkError> {
        self.graph.check(from)?;
        self.graph.check(to)?;
        TransferSearch::new(&self.graph).run(from, to)
    }

    /// Open a new route. Fails if the stops are already joined.
    pub fn insert_route(&mut self, route: Route) -> Result<(), NetworkError> {
        self.graph.insert(route)?;
        info!(from = %route.from, to = %route.to, "route added");
        Ok(())
    }

    /// Close the route between two stops.
    pub fn delete_route(&mut self, from: StopId, to: StopId) -> Result<(), NetworkError> {
        self.graph.delete(from, to)?;
        info!(from = %from, to = %to, "route removed");
        Ok(())
    }

    /// Every active stop with its live routes.
    pub fn stops(&self) -> Vec<StopDetail> {
        self.graph.stop_list()
    }

    /// One stop with its live routes.
    pub fn stop_detail(&self, stop: StopId) -> Result<StopDetail, NetworkError> {
        self.graph.stop_detail(stop)
    }

    /// Components, or the minimum tour weight if the network is connected.
    pub fn connectivity(&self) -> Connectivity {
        connectivity::analyse(&self.graph)
    }

    fn optimal(&self, from: StopId, to: StopId, channel: WeightChannel) -> Result<Itinerary, NetworkError> {
        self.graph.check(from)?;
        self.graph.check(to)?;
        ShortestPathTree::run(&self.graph, from, channel).itinerary(to)
    }
}

impl Default for TransitNetwork {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
