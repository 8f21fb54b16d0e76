//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The coordinator and the alternative-route search call routing via the
//! [`Router`] trait, so applications can swap in another implementation
//! without touching the planner.  The default [`DijkstraRouter`] is the
//! textbook O(V²) variant: the next node is picked by a linear scan over all
//! unvisited nodes, with no priority queue.
//!
//! # Outcomes
//!
//! | Result                        | Meaning                                  |
//! |-------------------------------|------------------------------------------|
//! | `Ok(route)`, `route.nodes` ≥ 2 | a path                                  |
//! | `Ok(route)`, trivial          | start and end are the same node          |
//! | `Err(NoRoute)`                | end not reachable from start             |
//! | `Err(SnapFailed)`             | an endpoint is too far from every node   |
//!
//! Callers must not treat a trivial route as a failure, nor a failure as a
//! trivial route.

use rn_core::{NodeId, Point};

use crate::graph::{Graph, SearchState};
use crate::query::snap_to_node;
use crate::SpatialError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes to traverse in order, start and end included.  Empty when the
    /// start is the end.
    pub nodes: Vec<NodeId>,
    /// Total Euclidean length.
    pub length: f64,
    /// Branch candidates collected while backtracking: at every node of the
    /// route with more than one out-edge, the out-edge targets the route
    /// did *not* take.  Seeds for [`AlternativeSearch`](crate::AlternativeSearch).
    pub branches: Vec<NodeId>,
}

impl Route {
    pub fn trivial() -> Self {
        Self { nodes: Vec::new(), length: 0.0, branches: Vec::new() }
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Coordinates of the route's nodes.
    pub fn points(&self, graph: &Graph) -> Vec<Point> {
        graph.points(&self.nodes)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; routing only reads the graph, so
/// a router can serve several callers sharing one `&Graph`.
pub trait Router: Send + Sync {
    /// Compute the shortest route from `from` to `to`.
    ///
    /// `from == to` yields a trivial route, not an error.
    fn route(&self, graph: &Graph, from: NodeId, to: NodeId) -> Result<Route, SpatialError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm with linear-scan node selection.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &Graph, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
        dijkstra(graph, from, to)
    }
}

/// Snap `start` and `end` onto `graph` and route between them.
///
/// Each endpoint is snapped with [`snap_to_node`] within `snap_range`; an
/// endpoint with no node in range fails with [`SpatialError::SnapFailed`].
pub fn shortest_path<R: Router + ?Sized>(
    graph: &Graph,
    router: &R,
    start: Point,
    end: Point,
    snap_range: f64,
) -> Result<Route, SpatialError> {
    let snap = |p: Point| {
        snap_to_node(graph, p, snap_range).ok_or_else(|| {
            log::debug!("no node within {snap_range} of {p}");
            SpatialError::SnapFailed { point: p, range: snap_range }
        })
    };
    let from = snap(start)?;
    let to = snap(end)?;
    router.route(graph, from, to)
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(graph: &Graph, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
    for id in [from, to] {
        if !graph.contains(id) {
            return Err(SpatialError::NodeNotFound(id));
        }
    }
    if from == to {
        return Ok(Route::trivial());
    }

    let mut state = SearchState::new(graph);
    state.distance[from.index()] = 0.0;

    let mut current = from;
    loop {
        let base = state.distance[current.index()];
        for &next in graph.out_edges(current) {
            if state.visited[next.index()] {
                continue;
            }
            let candidate = base + graph.edge_length(current, next);
            if candidate < state.distance[next.index()] {
                state.distance[next.index()] = candidate;
            }
        }
        state.visited[current.index()] = true;

        if current == to {
            break;
        }
        current = match state.closest_unvisited() {
            Some(n) => n,
            None => {
                log::debug!("{to} is unreachable from {from}");
                return Err(SpatialError::NoRoute { from, to });
            }
        };
    }

    Ok(backtrack(graph, &state, from, to))
}

/// Walk back from `to` along in-edges whose source accounts exactly for the
/// recorded distance.
///
/// If rounding leaves no in-edge matching exactly, the closest-matching
/// settled predecessor is taken instead.  Every step moves to a strictly
/// smaller distance, so the walk always reaches `from`.
fn backtrack(graph: &Graph, state: &SearchState, from: NodeId, to: NodeId) -> Route {
    let dist = &state.distance;
    let mut nodes = vec![to];
    let mut branches = Vec::new();
    let mut current = to;

    while current != from {
        let here = dist[current.index()];
        let preds = graph.in_edges(current);

        let exact = preds.iter().copied().find(|&p| {
            p != current && dist[p.index()] + graph.edge_length(p, current) == here
        });
        let pred = exact.or_else(|| {
            preds
                .iter()
                .copied()
                .filter(|&p| p != current && dist[p.index()] < here)
                .min_by(|&a, &b| {
                    let ea = (dist[a.index()] + graph.edge_length(a, current) - here).abs();
                    let eb = (dist[b.index()] + graph.edge_length(b, current) - here).abs();
                    ea.total_cmp(&eb)
                })
        });
        let Some(pred) = pred else {
            // Unreachable for a distance table produced by `dijkstra`.
            break;
        };

        if graph.out_degree(pred) > 1 {
            branches.extend(graph.out_edges(pred).iter().copied().filter(|&n| n != current));
        }
        nodes.push(pred);
        current = pred;
    }

    nodes.reverse();
    Route { nodes, length: dist[to.index()], branches }
}
