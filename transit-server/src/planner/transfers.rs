//! Fewest-hop search.
//!
//! Breadth-first over live routes, ignoring both weights: every route
//! counts as one transfer.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::domain::{NetworkError, StopId, WeightChannel};
use crate::graph::TransitGraph;

use super::shortest::ShortestPathTree;

/// A path with the fewest possible hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRoute {
    /// Number of routes ridden.
    pub hops: usize,

    /// Stops from origin to destination inclusive.
    pub path: Vec<StopId>,
}

/// Breadth-first search for the path with the fewest transfers.
pub struct TransferSearch<'a> {
    graph: &'a TransitGraph,
}

impl<'a> TransferSearch<'a> {
    /// Create a search over `graph`.
    pub fn new(graph: &'a TransitGraph) -> Self {
        Self { graph }
    }

    /// Fewest-hop path from `source` to `target`.
    pub fn run(&self, source: StopId, target: StopId) -> Result<TransferRoute, NetworkError> {
        let unreachable = NetworkError::Unreachable {
            from: source,
            to: target,
            channel: WeightChannel::Distance,
        };

        // Cheap rejection before exhausting the source's component
        let probe = ShortestPathTree::run(self.graph, source, WeightChannel::Distance);
        if !probe.is_reachable(target) {
            return Err(unreachable);
        }

        let slots = self.graph.slots();
        let mut visited = vec![false; slots];
        let mut pred: Vec<Option<StopId>> = vec![None; slots];
        let mut queue = VecDeque::new();

        visited[source.index()] = true;
        queue.push_back((0usize, source));

        while let Some((hops, stop)) = queue.pop_front() {
            if stop == target {
                let path = walk_back(&pred, source, target);
                debug!(source = %source, target = %target, hops, "fewest-hop path found");
                return Ok(TransferRoute { hops, path });
            }
            for next in self.graph.neighbors(stop) {
                let to = next.stop.index();
                if visited[to] {
                    continue;
                }
                visited[to] = true;
                pred[to] = Some(stop);
                queue.push_back((hops + 1, next.stop));
            }
        }

        Err(unreachable)
    }
}

fn walk_back(pred: &[Option<StopId>], source: StopId, target: StopId) -> Vec<StopId> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match pred[current.index()] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
