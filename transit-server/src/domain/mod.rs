//! Domain types for the transit network engine.
//!
//! Stop identifiers, route weights and the error taxonomy shared by the
//! graph store and every query.

mod error;
mod stop;
mod weight;

pub use error::NetworkError;
pub use stop::{InvalidStopId, StopId};
pub use weight::{MAX_ROUTE_WEIGHT, UNREACHED, Weight, WeightChannel};
