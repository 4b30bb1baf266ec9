//! Network error types.
//!
//! Every condition here is recoverable: the engine reports it and the
//! network is left exactly as it was before the failing call.

use super::{StopId, Weight, WeightChannel};

/// Errors returned by network queries and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// No path exists between the two stops under the requested channel
    #[error("stop {to} is unreachable from stop {from} by {channel}")]
    Unreachable {
        from: StopId,
        to: StopId,
        channel: WeightChannel,
    },

    /// An active route already joins the two stops
    #[error("a route between stops {from} and {to} already exists")]
    EdgeExists { from: StopId, to: StopId },

    /// No active route joins the two stops
    #[error("no route between stops {from} and {to}")]
    EdgeNotFound { from: StopId, to: StopId },

    /// Fewer walks reach the target than were asked for
    #[error("only {found} of {requested} requested paths exist")]
    InsufficientPaths { requested: usize, found: usize },

    /// Stop id outside the network's stop range
    #[error("stop {stop} is outside the network (stops are 1..={max})")]
    InvalidStop { stop: u32, max: u32 },

    /// Requested stop count exceeds the configured capacity
    #[error("{requested} stops requested but capacity is {capacity}")]
    CapacityExceeded { requested: u32, capacity: u32 },

    /// Route fare or distance above the supported maximum
    #[error("route between stops {from} and {to} has weight {weight}, above the maximum {max}")]
    WeightTooLarge {
        from: StopId,
        to: StopId,
        weight: Weight,
        max: Weight,
    },

    /// A route may not start and end at the same stop
    #[error("a route cannot join stop {0} to itself")]
    SelfLoop(StopId),

    /// Stop has no live routes (never used, or all routes deleted)
    #[error("stop {0} does not exist or has been removed")]
    InactiveStop(StopId),
}
