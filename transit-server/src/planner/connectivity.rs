//! Connected components and minimum tour weight.
//!
//! Components come from a union-find pass over live routes. When every
//! active stop is in one component, a Kruskal spanning tree over route
//! distances gives the minimum weight needed to visit every stop.

use serde::Serialize;
use tracing::debug;

use crate::domain::{StopId, Weight};
use crate::graph::TransitGraph;

/// Union-Find (disjoint set union) over stop slots.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    /// Create `size` singleton sets.
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Root of the set holding `x`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets holding `x` and `y`. Returns false if already merged.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let px = self.find(x);
        let py = self.find(y);
        if px == py {
            return false;
        }
        // Union by rank
        if self.rank[px] < self.rank[py] {
            self.parent[px] = py;
        } else if self.rank[px] > self.rank[py] {
            self.parent[py] = px;
        } else {
            self.parent[py] = px;
            self.rank[px] += 1;
        }
        true
    }
}

/// One set of mutually reachable stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// The union-find root standing for the whole set.
    pub representative: StopId,

    /// Member stops, ascending.
    pub stops: Vec<StopId>,
}

/// Active stops split into connected components, ordered by lowest member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub components: Vec<Component>,
}

impl Partition {
    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if there are no active stops.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The component containing `stop`, if it is active.
    pub fn component_of(&self, stop: StopId) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.stops.binary_search(&stop).is_ok())
    }
}

/// Outcome of a connectivity query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Connectivity {
    /// Every active stop reaches every other.
    Connected {
        stops: usize,
        /// Minimum total distance of routes needed to visit every stop.
        tour_weight: Weight,
    },
    /// Zero or several components; no tour exists.
    Fragmented(Partition),
}

/// Split the active stops into connected components.
pub fn partition(graph: &TransitGraph) -> Partition {
    let mut sets = UnionFind::new(graph.slots());
    for route in graph.routes() {
        sets.union(route.from.index(), route.to.index());
    }

    let mut stops: Vec<StopId> = graph.active_stops().collect();
    stops.sort();

    let mut components: Vec<Component> = Vec::new();
    // Root slot -> position in `components`
    let mut slot_of_root: Vec<Option<usize>> = vec![None; graph.slots()];
    for stop in stops {
        let root = sets.find(stop.index());
        match slot_of_root[root] {
            Some(at) => components[at].stops.push(stop),
            None => {
                slot_of_root[root] = Some(components.len());
                let representative = graph.stop(root as u32).unwrap_or(stop);
                components.push(Component {
                    representative,
                    stops: vec![stop],
                });
            }
        }
    }

    Partition { components }
}

/// Total distance of a minimum spanning forest over live routes.
pub fn spanning_weight(graph: &TransitGraph) -> Weight {
    let mut routes: Vec<_> = graph.routes().collect();
    routes.sort_by_key(|r| r.distance);

    let mut sets = UnionFind::new(graph.slots());
    let mut total: Weight = 0;
    let mut accepted = 0usize;
    for route in routes {
        if sets.union(route.from.index(), route.to.index()) {
            total = total.saturating_add(route.distance);
            accepted += 1;
        }
    }
    debug!(accepted, total, "spanning tree complete");
    total
}

/// Components, or the tour weight when the network is one component.
pub fn analyse(graph: &TransitGraph) -> Connectivity {
    let partition = partition(graph);
    debug!(components = partition.len(), "partition complete");
    match partition.components.as_slice() {
        [only] => Connectivity::Connected {
            stops: only.stops.len(),
            tour_weight: spanning_weight(graph),
        },
        _ => Connectivity::Fragmented(partition),
    }
}
