//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{StopId, Weight, WeightChannel};
use crate::graph::{BuildSummary, StopDetail};
use crate::planner::{Itinerary, TransferRoute};

/// Query naming an origin and destination stop.
#[derive(Debug, Deserialize)]
pub struct StopPairQuery {
    /// Origin stop id
    pub from: u32,

    /// Destination stop id
    pub to: u32,
}

/// Query for the k shortest walks.
#[derive(Debug, Deserialize)]
pub struct KBestQuery {
    pub from: u32,
    pub to: u32,

    /// Number of walks wanted
    pub k: usize,
}

/// Request to open a new route.
#[derive(Debug, Deserialize)]
pub struct InsertRouteRequest {
    pub from: u32,
    pub to: u32,

    /// Fare for riding the route
    pub cost: Weight,

    /// Physical length of the route
    pub distance: Weight,
}

/// Response after replacing the network.
#[derive(Debug, Serialize)]
pub struct BuildNetworkResponse {
    /// Size of the stop id range
    pub stop_count: u32,

    /// Routes stored
    pub routes: usize,

    /// Input routes that overwrote an earlier duplicate
    pub overwritten: usize,

    /// Input self-loops that were dropped
    pub self_loops: usize,
}

impl BuildNetworkResponse {
    pub fn new(stop_count: u32, summary: BuildSummary) -> Self {
        Self {
            stop_count,
            routes: summary.routes,
            overwritten: summary.overwritten,
            self_loops: summary.self_loops,
        }
    }
}

/// An optimal path on one channel.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Channel minimised ("cost" or "distance")
    pub channel: WeightChannel,

    /// Total fare or distance
    pub weight: Weight,

    /// Stops visited, origin first
    pub path: Vec<StopId>,

    /// Number of distinct optimal paths
    pub tie_count: u64,
}

impl From<Itinerary> for ItineraryResult {
    fn from(it: Itinerary) -> Self {
        Self {
            channel: it.channel,
            weight: it.weight,
            path: it.path,
            tie_count: it.tie_count,
        }
    }
}

/// Response for k-best queries.
#[derive(Debug, Serialize)]
pub struct KBestResponse {
    /// Walk lengths, ascending
    pub lengths: Vec<Weight>,
}

/// Response for fewest-transfer queries.
#[derive(Debug, Serialize)]
pub struct TransferResult {
    /// Number of routes ridden
    pub hops: usize,

    /// Stops visited, origin first
    pub path: Vec<StopId>,
}

impl From<TransferRoute> for TransferResult {
    fn from(route: TransferRoute) -> Self {
        Self {
            hops: route.hops,
            path: route.path,
        }
    }
}

/// Response listing active stops.
#[derive(Debug, Serialize)]
pub struct StopListResponse {
    pub stops: Vec<StopDetail>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
