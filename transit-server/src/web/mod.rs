//! Web layer for the transit network.
//!
//! Provides JSON endpoints for building the network, querying routes
//! and editing it while the server runs.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
