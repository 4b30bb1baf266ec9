//! Route weights and the channel selector used by weighted queries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative route weight (fare or distance), or a sum of them.
pub type Weight = u64;

/// Distance of a stop that has not been reached. Larger than any feasible sum.
pub const UNREACHED: Weight = Weight::MAX;

/// Largest fare or distance a single route may carry.
///
/// Sums over any simple path stay far below [`UNREACHED`]: even a path
/// through `u32::MAX` stops totals less than `u64::MAX`.
pub const MAX_ROUTE_WEIGHT: Weight = u32::MAX as Weight;

/// Which of a route's two independent weights a query minimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightChannel {
    /// Fare paid to ride the route.
    Cost,
    /// Physical length of the route.
    Distance,
}

impl WeightChannel {
    /// Pick this channel's value out of a (cost, distance) pair.
    pub fn select(self, cost: Weight, distance: Weight) -> Weight {
        match self {
            WeightChannel::Cost => cost,
            WeightChannel::Distance => distance,
        }
    }
}

impl fmt::Display for WeightChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightChannel::Cost => f.write_str("cost"),
            WeightChannel::Distance => f.write_str("distance"),
        }
    }
}
