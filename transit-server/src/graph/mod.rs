//! Graph storage for the transit network.
//!
//! [`TransitGraph`] holds stops and routes with soft deletion;
//! [`PriorityQueue`] is the binary heap the weighted searches run on.

mod heap;
mod store;

pub use heap::{Compare, Greater, Less, MaxHeap, MinHeap, PriorityQueue};
pub use store::{BuildSummary, Neighbor, Neighbors, Route, StopDetail, TransitGraph};
