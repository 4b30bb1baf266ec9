//! Stop identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing a stop identifier from an invalid number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id {raw}: stop ids start at 1")]
pub struct InvalidStopId {
    raw: u32,
}

/// A stop identifier.
///
/// Stops are numbered from 1; zero is never a valid stop. Whether a
/// given id falls inside a particular network's capacity is checked by
/// the graph, not here.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StopId;
///
/// let stop = StopId::new(7).unwrap();
/// assert_eq!(stop.get(), 7);
///
/// // Zero is rejected
/// assert!(StopId::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StopId(u32);

impl StopId {
    /// Create a stop id, rejecting zero.
    pub fn new(raw: u32) -> Result<Self, InvalidStopId> {
        if raw == 0 {
            return Err(InvalidStopId { raw });
        }
        Ok(StopId(raw))
    }

    /// Returns the raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Slot of this stop in per-stop tables (the id itself; slot 0 is unused).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u32> for StopId {
    type Error = InvalidStopId;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        StopId::new(raw)
    }
}

impl From<StopId> for u32 {
    fn from(stop: StopId) -> u32 {
        stop.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every positive id is accepted and preserved
        #[test]
        fn positive_always_accepted(raw in 1u32..) {
            let stop = StopId::new(raw).unwrap();
            prop_assert_eq!(stop.get(), raw);
            prop_assert_eq!(stop.index(), raw as usize);
        }
    }
}
