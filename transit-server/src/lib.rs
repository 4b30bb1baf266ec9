//! Transit network query engine.
//!
//! An in-memory graph of stops joined by two-way routes, each carrying a
//! fare and a physical distance. The engine answers shortest-distance,
//! cheapest-fare, k-shortest, fewest-transfer and connectivity queries,
//! and accepts route insertions and deletions between queries.

pub mod config;
pub mod domain;
pub mod graph;
pub mod loader;
pub mod network;
pub mod planner;
pub mod web;
