//! Route queries over the transit graph.
//!
//! Each query borrows the graph immutably and owns its scratch state, so
//! nothing carries over from one query to the next:
//!
//! - [`ShortestPathTree`]: Dijkstra on fare or distance, with tie counts
//! - [`KBestSearch`]: A* enumeration of the k shortest walks
//! - [`TransferSearch`]: breadth-first fewest-hop paths
//! - [`connectivity`]: union-find components and the spanning tour weight

mod config;
pub mod connectivity;
mod kbest;
mod shortest;
mod transfers;

pub use config::EngineConfig;
pub use connectivity::{Component, Connectivity, Partition};
pub use kbest::KBestSearch;
pub use shortest::{Itinerary, ShortestPathTree};
pub use transfers::{TransferRoute, TransferSearch};
