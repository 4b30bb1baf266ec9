//! Single-source shortest paths with tie counting.
//!
//! Dijkstra over one weight channel. The heap is not decrease-key
//! capable: an improved stop is pushed again and stale entries are
//! skipped when popped, by checking whether the stop is already settled.

use serde::Serialize;
use tracing::debug;

use crate::domain::{NetworkError, StopId, UNREACHED, Weight, WeightChannel};
use crate::graph::{MinHeap, TransitGraph};

/// An optimal path between two stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    /// Channel the path is optimal for.
    pub channel: WeightChannel,

    /// Total weight on that channel.
    pub weight: Weight,

    /// Stops from origin to destination inclusive.
    pub path: Vec<StopId>,

    /// Number of distinct paths achieving `weight`.
    pub tie_count: u64,
}

/// Result of one shortest-path run: distances, predecessors and path
/// counts from a single source to every stop.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: StopId,
    channel: WeightChannel,
    dist: Vec<Weight>,
    pred: Vec<Option<StopId>>,
    count: Vec<u64>,
}

impl ShortestPathTree {
    /// Run Dijkstra from `source` minimising `channel`.
    pub fn run(graph: &TransitGraph, source: StopId, channel: WeightChannel) -> Self {
        let slots = graph.slots();
        let mut tree = Self {
            source,
            channel,
            dist: vec![UNREACHED; slots],
            pred: vec![None; slots],
            count: vec![0; slots],
        };
        if source.index() >= slots {
            return tree;
        }

        let mut settled = vec![false; slots];
        let mut settled_count = 0usize;
        let mut queue: MinHeap<(Weight, StopId)> = MinHeap::new();

        tree.dist[source.index()] = 0;
        tree.count[source.index()] = 1;
        queue.push((0, source));

        while let Some((dist, stop)) = queue.pop() {
            let at = stop.index();
            if settled[at] {
                continue;
            }
            settled[at] = true;
            settled_count += 1;

            for next in graph.neighbors(stop) {
                let to = next.stop.index();
                let candidate = dist.saturating_add(next.weight(channel));
                if candidate < tree.dist[to] {
                    tree.dist[to] = candidate;
                    tree.pred[to] = Some(stop);
                    tree.count[to] = tree.count[at];
                    queue.push((candidate, next.stop));
                } else if candidate == tree.dist[to] && !settled[to] {
                    tree.count[to] = tree.count[to].saturating_add(tree.count[at]);
                }
            }
        }

        debug!(
            source = %source,
            %channel,
            settled = settled_count,
            "shortest path tree complete"
        );
        tree
    }

    /// The stop every distance is measured from.
    pub fn source(&self) -> StopId {
        self.source
    }

    /// The channel this tree minimises.
    pub fn channel(&self) -> WeightChannel {
        self.channel
    }

    /// Returns true if some path leads from the source to `stop`.
    pub fn is_reachable(&self, stop: StopId) -> bool {
        self.distance(stop).is_some()
    }

    /// Minimum total weight to `stop`, or `None` if unreachable.
    pub fn distance(&self, stop: StopId) -> Option<Weight> {
        self.dist
            .get(stop.index())
            .copied()
            .filter(|&d| d != UNREACHED)
    }

    /// Number of distinct optimal paths to `stop` (0 if unreachable).
    pub fn tie_count(&self, stop: StopId) -> u64 {
        if !self.is_reachable(stop) {
            return 0;
        }
        self.count[stop.index()]
    }

    /// One optimal path from the source to `stop`, by walking predecessors.
    pub fn path_to(&self, stop: StopId) -> Option<Vec<StopId>> {
        if !self.is_reachable(stop) {
            return None;
        }
        let mut path = vec![stop];
        let mut current = stop;
        while current != self.source {
            current = self.pred[current.index()]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// Weight, path and tie count to `stop`.
    pub fn itinerary(&self, stop: StopId) -> Result<Itinerary, NetworkError> {
        let unreachable = || NetworkError::Unreachable {
            from: self.source,
            to: stop,
            channel: self.channel,
        };
        let weight = self.distance(stop).ok_or_else(unreachable)?;
        let path = self.path_to(stop).ok_or_else(unreachable)?;
        Ok(Itinerary {
            channel: self.channel,
            weight,
            path,
            tie_count: self.tie_count(stop),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::graph::Route;
    use proptest::prelude::*;

    const STOPS: u32 = 8;

    fn routes() -> impl Strategy<Value = Vec<(u32, u32, Weight, Weight)>> {
        proptest::collection::vec((1..=STOPS, 1..=STOPS, 0..20u64, 0..20u64), 0..24)
    }

    fn build(routes: &[(u32, u32, Weight, Weight)]) -> TransitGraph {
        let routes: Vec<_> = routes
            .iter()
            .map(|&(a, b, c, d)| {
                Route::new(StopId::new(a).unwrap(), StopId::new(b).unwrap(), c, d)
            })
            .collect();
        let mut graph = TransitGraph::new(STOPS);
        graph.build(STOPS, &routes).unwrap();
        graph
    }

    /// Reference distances by repeated relaxation.
    fn bellman_ford(graph: &TransitGraph, source: u32, channel: WeightChannel) -> Vec<Weight> {
        let mut dist = vec![UNREACHED; STOPS as usize + 1];
        dist[source as usize] = 0;
        for _ in 0..STOPS {
            for from in 1..=STOPS {
                if dist[from as usize] == UNREACHED {
                    continue;
                }
                for n in graph.neighbors(StopId::new(from).unwrap()) {
                    let candidate = dist[from as usize] + n.weight(channel);
                    if candidate < dist[n.stop.index()] {
                        dist[n.stop.index()] = candidate;
                    }
                }
            }
        }
        dist
    }

    proptest! {
        /// Distances match an exhaustive relaxation
        #[test]
        fn matches_reference(routes in routes(), source in 1..=STOPS, cost in any::<bool>()) {
            let channel = if cost { WeightChannel::Cost } else { WeightChannel::Distance };
            let graph = build(&routes);
            let tree = ShortestPathTree::run(&graph, StopId::new(source).unwrap(), channel);
            let expected = bellman_ford(&graph, source, channel);
            for stop in 1..=STOPS {
                let got = tree.distance(StopId::new(stop).unwrap()).unwrap_or(UNREACHED);
                prop_assert_eq!(got, expected[stop as usize]);
            }
        }

        /// Every reconstructed path starts at the source and sums to the distance
        #[test]
        fn path_weight_equals_distance(routes in routes(), source in 1..=STOPS) {
            let graph = build(&routes);
            let tree = ShortestPathTree::run(&graph, StopId::new(source).unwrap(), WeightChannel::Distance);
            for stop in 1..=STOPS {
                let stop = StopId::new(stop).unwrap();
                let Some(path) = tree.path_to(stop) else { continue };
                prop_assert_eq!(path[0].get(), source);
                prop_assert_eq!(*path.last().unwrap(), stop);
                let total: Weight = path
                    .windows(2)
                    .map(|pair| {
                        graph
                            .neighbors(pair[0])
                            .find(|n| n.stop == pair[1])
                            .map(|n| n.distance)
                            .unwrap()
                    })
                    .sum();
                prop_assert_eq!(Some(total), tree.distance(stop));
                prop_assert!(tree.tie_count(stop) >= 1);
            }
        }
    }
}
