//! K shortest walks between two stops.
//!
//! A* over partial walks. Walks may revisit stops, so every walk that
//! reaches the target is a distinct answer, popped in order of total
//! length. The heuristic is the exact remaining distance to the target,
//! taken from a shortest-path tree grown backwards from the target.
//! Routes are undirected, so distances from the target equal distances
//! to it.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::domain::{NetworkError, StopId, Weight, WeightChannel};
use crate::graph::{MinHeap, TransitGraph};

use super::shortest::ShortestPathTree;

/// A partial walk waiting in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    /// Length so far plus the remaining lower bound.
    estimate: Weight,
    /// Length so far.
    travelled: Weight,
    /// Push order, so equal walks are served first-come first-served.
    seq: u64,
    stop: StopId,
}

impl Ord for Candidate {
    /// Smallest estimate first; among equal estimates the walk that has
    /// travelled further (is closer to done) first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimate
            .cmp(&other.estimate)
            .then_with(|| other.travelled.cmp(&self.travelled))
            .then_with(|| self.seq.cmp(&other.seq))
            .then_with(|| self.stop.cmp(&other.stop))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the lengths of the k shortest walks by distance.
pub struct KBestSearch<'a> {
    graph: &'a TransitGraph,
}

impl<'a> KBestSearch<'a> {
    /// Create a search over `graph`.
    pub fn new(graph: &'a TransitGraph) -> Self {
        Self { graph }
    }

    /// Lengths of the `k` shortest `source` to `target` walks, ascending.
    ///
    /// When `source == target` the empty walk is not an answer: the k
    /// returned lengths are all of walks that leave and come back.
    pub fn run(&self, source: StopId, target: StopId, k: usize) -> Result<Vec<Weight>, NetworkError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let heuristic = ShortestPathTree::run(self.graph, target, WeightChannel::Distance);
        let Some(start_estimate) = heuristic.distance(source) else {
            return Err(NetworkError::Unreachable {
                from: source,
                to: target,
                channel: WeightChannel::Distance,
            });
        };

        let round_trip = source == target;
        let wanted = if round_trip { k + 1 } else { k };

        let mut lengths = Vec::with_capacity(wanted);
        let mut queue = MinHeap::new();
        let mut seq = 0u64;
        let mut expansions = 0usize;

        queue.push(Candidate {
            estimate: start_estimate,
            travelled: 0,
            seq,
            stop: source,
        });

        while let Some(walk) = queue.pop() {
            if walk.stop == target {
                trace!(length = walk.travelled, found = lengths.len() + 1, "walk reached target");
                lengths.push(walk.travelled);
                if lengths.len() == wanted {
                    break;
                }
            }

            expansions += 1;
            for next in self.graph.neighbors(walk.stop) {
                let Some(remaining) = heuristic.distance(next.stop) else {
                    continue;
                };
                let travelled = walk.travelled.saturating_add(next.distance);
                seq += 1;
                queue.push(Candidate {
                    estimate: travelled.saturating_add(remaining),
                    travelled,
                    seq,
                    stop: next.stop,
                });
            }
        }

        debug!(
            source = %source,
            target = %target,
            k,
            found = lengths.len(),
            expansions,
            "k-best search complete"
        );

        if lengths.len() < wanted {
            let found = if round_trip {
                lengths.len().saturating_sub(1)
            } else {
                lengths.len()
            };
            return Err(NetworkError::InsufficientPaths { requested: k, found });
        }
        if round_trip {
            lengths.remove(0);
        }
        Ok(lengths)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::graph::Route;
    use proptest::prelude::*;

    const STOPS: u32 = 6;

    fn build(routes: &[(u32, u32, Weight)]) -> TransitGraph {
        let routes: Vec<_> = routes
            .iter()
            .map(|&(a, b, d)| Route::new(StopId::new(a).unwrap(), StopId::new(b).unwrap(), 1, d))
            .collect();
        let mut graph = TransitGraph::new(STOPS);
        graph.build(STOPS, &routes).unwrap();
        graph
    }

    proptest! {
        /// Output is non-decreasing, has k entries, and starts at the shortest distance
        #[test]
        fn sorted_and_anchored(
            routes in proptest::collection::vec((1..=STOPS, 1..=STOPS, 0..10u64), 1..12),
            source in 1..=STOPS,
            target in 1..=STOPS,
            k in 1usize..6,
        ) {
            prop_assume!(source != target);
            let graph = build(&routes);
            let (source, target) = (StopId::new(source).unwrap(), StopId::new(target).unwrap());
            let tree = ShortestPathTree::run(&graph, source, WeightChannel::Distance);
            let result = KBestSearch::new(&graph).run(source, target, k);

            match tree.distance(target) {
                None => {
                    let unreachable = matches!(result, Err(NetworkError::Unreachable { .. }));
                    prop_assert!(unreachable);
                }
                Some(shortest) => {
                    let lengths = result.unwrap();
                    prop_assert_eq!(lengths.len(), k);
                    prop_assert_eq!(lengths[0], shortest);
                    prop_assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
                }
            }
        }
    }
}
