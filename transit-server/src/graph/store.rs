//! Mutable adjacency-list graph over stop ids.
//!
//! Arcs live in an append-only arena and each stop keeps the handle of
//! its most recently added arc; arcs chain to the previous one through
//! `next`. Deleting a route tombstones its two arcs in place, so
//! insertion and deletion never move or compact storage, and every
//! traversal skips tombstoned slots.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{MAX_ROUTE_WEIGHT, NetworkError, StopId, Weight, WeightChannel};

/// Handle of an arc slot in the arena.
type ArcId = usize;

/// An undirected route between two stops with its fare and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: StopId,
    pub to: StopId,
    pub cost: Weight,
    pub distance: Weight,
}

impl Route {
    /// Create a route.
    pub fn new(from: StopId, to: StopId, cost: Weight, distance: Weight) -> Self {
        Self {
            from,
            to,
            cost,
            distance,
        }
    }

    /// Check both weights against [`MAX_ROUTE_WEIGHT`].
    pub fn check_weights(&self) -> Result<(), NetworkError> {
        let heaviest = self.cost.max(self.distance);
        if heaviest > MAX_ROUTE_WEIGHT {
            return Err(NetworkError::WeightTooLarge {
                from: self.from,
                to: self.to,
                weight: heaviest,
                max: MAX_ROUTE_WEIGHT,
            });
        }
        Ok(())
    }
}

/// One directed arc slot. `target` is `None` once the arc is deleted.
#[derive(Debug, Clone)]
struct ArcSlot {
    target: Option<StopId>,
    cost: Weight,
    distance: Weight,
    next: Option<ArcId>,
}

/// A live arc seen from its source stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub stop: StopId,
    pub cost: Weight,
    pub distance: Weight,
}

impl Neighbor {
    /// The arc's weight on the given channel.
    pub fn weight(&self, channel: WeightChannel) -> Weight {
        channel.select(self.cost, self.distance)
    }
}

/// Lazy walk over a stop's live arcs, most recently added first.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    arcs: &'a [ArcSlot],
    cursor: Option<ArcId>,
}

impl Iterator for Neighbors<'_> {
    type Item = Neighbor;

    fn next(&mut self) -> Option<Neighbor> {
        loop {
            let slot = &self.arcs[self.cursor?];
            self.cursor = slot.next;
            if let Some(stop) = slot.target {
                return Some(Neighbor {
                    stop,
                    cost: slot.cost,
                    distance: slot.distance,
                });
            }
        }
    }
}

/// A stop and its live adjacency, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopDetail {
    pub stop: StopId,
    pub neighbors: Vec<Neighbor>,
}

/// Counts from a bulk build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Routes stored.
    pub routes: usize,
    /// Input routes that repeated an earlier pair and overwrote its weights.
    pub overwritten: usize,
    /// Input routes from a stop to itself, dropped.
    pub self_loops: usize,
}

/// The transit network's adjacency structure.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    capacity: u32,
    stop_count: u32,
    heads: Vec<Option<ArcId>>,
    arcs: Vec<ArcSlot>,
    /// Live arcs leaving each stop. A stop is active while this is non-zero.
    live_degree: Vec<u32>,
    /// Stops in the order they first appeared in a route.
    known: Vec<StopId>,
}

impl TransitGraph {
    /// Create an empty graph that can hold stops `1..=capacity`.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            stop_count: 0,
            heads: vec![None],
            arcs: Vec::new(),
            live_degree: vec![0],
            known: Vec::new(),
        }
    }

    /// Largest stop count `build` accepts.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of stop ids in the current network (ids are `1..=stop_count`).
    pub fn stop_count(&self) -> u32 {
        self.stop_count
    }

    /// Number of per-stop slots, for sizing query scratch tables.
    pub(crate) fn slots(&self) -> usize {
        self.heads.len()
    }

    /// Check that a raw id names a stop of this network.
    pub fn stop(&self, raw: u32) -> Result<StopId, NetworkError> {
        match StopId::new(raw) {
            Ok(stop) if raw <= self.stop_count => Ok(stop),
            _ => Err(NetworkError::InvalidStop {
                stop: raw,
                max: self.stop_count,
            }),
        }
    }

    /// Check that a stop id lies inside this network.
    pub fn check(&self, stop: StopId) -> Result<(), NetworkError> {
        self.stop(stop.get()).map(|_| ())
    }

    /// Discard the current network and load `routes` over stops `1..=stop_count`.
    ///
    /// Every route is validated before anything is discarded, so a failed
    /// build leaves the previous network untouched. Self-loops are dropped
    /// and a repeated pair overwrites the earlier route's weights.
    pub fn build(&mut self, stop_count: u32, routes: &[Route]) -> Result<BuildSummary, NetworkError> {
        if stop_count > self.capacity {
            return Err(NetworkError::CapacityExceeded {
                requested: stop_count,
                capacity: self.capacity,
            });
        }
        for route in routes {
            for stop in [route.from, route.to] {
                if stop.get() > stop_count {
                    return Err(NetworkError::InvalidStop {
                        stop: stop.get(),
                        max: stop_count,
                    });
                }
            }
            route.check_weights()?;
        }

        let slots = stop_count as usize + 1;
        self.stop_count = stop_count;
        self.heads = vec![None; slots];
        self.live_degree = vec![0; slots];
        self.arcs = Vec::with_capacity(routes.len() * 2);
        self.known.clear();

        let mut summary = BuildSummary::default();
        for route in routes {
            if route.from == route.to {
                warn!(stop = %route.from, "skipping self-loop route");
                summary.self_loops += 1;
                continue;
            }
            if let (Some(there), Some(back)) = (
                self.find_arc(route.from, route.to),
                self.find_arc(route.to, route.from),
            ) {
                warn!(
                    from = %route.from,
                    to = %route.to,
                    "duplicate route, overwriting earlier weights"
                );
                for id in [there, back] {
                    self.arcs[id].cost = route.cost;
                    self.arcs[id].distance = route.distance;
                }
                summary.overwritten += 1;
                continue;
            }
            self.link(*route);
            summary.routes += 1;
        }

        debug!(
            stops = stop_count,
            routes = summary.routes,
            overwritten = summary.overwritten,
            self_loops = summary.self_loops,
            "graph built"
        );
        Ok(summary)
    }

    /// Add a route between two existing stop ids.
    ///
    /// Fails with `EdgeExists` if a live route already joins them.
    pub fn insert(&mut self, route: Route) -> Result<(), NetworkError> {
        self.check(route.from)?;
        self.check(route.to)?;
        if route.from == route.to {
            return Err(NetworkError::SelfLoop(route.from));
        }
        route.check_weights()?;
        if self.find_arc(route.from, route.to).is_some() {
            return Err(NetworkError::EdgeExists {
                from: route.from,
                to: route.to,
            });
        }
        self.link(route);
        Ok(())
    }

    /// Tombstone the live route between two stops.
    ///
    /// Stops left with no live arcs become inactive.
    pub fn delete(&mut self, from: StopId, to: StopId) -> Result<(), NetworkError> {
        self.check(from)?;
        self.check(to)?;
        let (Some(there), Some(back)) = (self.find_arc(from, to), self.find_arc(to, from)) else {
            return Err(NetworkError::EdgeNotFound { from, to });
        };
        self.arcs[there].target = None;
        self.arcs[back].target = None;
        self.live_degree[from.index()] -= 1;
        self.live_degree[to.index()] -= 1;
        Ok(())
    }

    /// Live arcs leaving `stop`, most recently added first.
    pub fn neighbors(&self, stop: StopId) -> Neighbors<'_> {
        Neighbors {
            arcs: &self.arcs,
            cursor: self.heads.get(stop.index()).copied().flatten(),
        }
    }

    /// Returns true if the stop has at least one live route.
    pub fn is_active(&self, stop: StopId) -> bool {
        self.live_degree
            .get(stop.index())
            .is_some_and(|&degree| degree > 0)
    }

    /// Active stops, in the order they first appeared in a route.
    pub fn active_stops(&self) -> impl Iterator<Item = StopId> + '_ {
        self.known.iter().copied().filter(|&s| self.is_active(s))
    }

    /// Every live route once, reported from its lower-numbered end.
    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.active_stops().flat_map(move |from| {
            self.neighbors(from)
                .filter(move |n| from < n.stop)
                .map(move |n| Route::new(from, n.stop, n.cost, n.distance))
        })
    }

    /// Adjacency of every active stop.
    pub fn stop_list(&self) -> Vec<StopDetail> {
        self.active_stops()
            .map(|stop| StopDetail {
                stop,
                neighbors: self.neighbors(stop).collect(),
            })
            .collect()
    }

    /// Adjacency of a single stop.
    pub fn stop_detail(&self, stop: StopId) -> Result<StopDetail, NetworkError> {
        self.check(stop)?;
        if !self.is_active(stop) {
            return Err(NetworkError::InactiveStop(stop));
        }
        Ok(StopDetail {
            stop,
            neighbors: self.neighbors(stop).collect(),
        })
    }

    /// Number of arc slots ever allocated, live or tombstoned.
    pub fn arc_slots(&self) -> usize {
        self.arcs.len()
    }

    fn find_arc(&self, from: StopId, to: StopId) -> Option<ArcId> {
        let mut cursor = self.heads.get(from.index()).copied().flatten();
        while let Some(id) = cursor {
            let slot = &self.arcs[id];
            if slot.target == Some(to) {
                return Some(id);
            }
            cursor = slot.next;
        }
        None
    }

    fn link(&mut self, route: Route) {
        self.push_arc(route.from, route.to, route.cost, route.distance);
        self.push_arc(route.to, route.from, route.cost, route.distance);
    }

    fn push_arc(&mut self, from: StopId, to: StopId, cost: Weight, distance: Weight) {
        let id = self.arcs.len();
        if self.heads[from.index()].is_none() {
            self.known.push(from);
        }
        self.arcs.push(ArcSlot {
            target: Some(to),
            cost,
            distance,
            next: self.heads[from.index()],
        });
        self.heads[from.index()] = Some(id);
        self.live_degree[from.index()] += 1;
    }
}
