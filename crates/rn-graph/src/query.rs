//! Spatial queries over a node collection.
//!
//! All functions are read-only.  The filters take an explicit node list so
//! they can be chained; the graph is only consulted for positions and
//! edges.
//!
//! # Coordinate convention
//!
//! `y` grows downwards (image convention).  "Above" a point therefore means
//! smaller `y`, and an edge goes [`Direction::Up`] when its target's `y` is
//! smaller than its source's.

use rn_core::{Direction, NodeId, Point, VehicleState};

use crate::Graph;

// ── Range filters ─────────────────────────────────────────────────────────────

/// Nodes whose `x` lies in `[point.x - left, point.x + right]`.
pub fn range_x(graph: &Graph, nodes: &[NodeId], point: Point, left: f64, right: f64) -> Vec<NodeId> {
    nodes
        .iter()
        .copied()
        .filter(|&n| {
            let x = graph.pos(n).x;
            x >= point.x - left && x <= point.x + right
        })
        .collect()
}

/// Nodes whose `y` lies in `[point.y - above, point.y + below]`.
pub fn range_y(graph: &Graph, nodes: &[NodeId], point: Point, above: f64, below: f64) -> Vec<NodeId> {
    nodes
        .iter()
        .copied()
        .filter(|&n| {
            let y = graph.pos(n).y;
            y >= point.y - above && y <= point.y + below
        })
        .collect()
}

// ── Axis-nearest selection ────────────────────────────────────────────────────

/// The node closest to `point` along the x axis.
///
/// Returns immediately on an exact match; otherwise the first node with the
/// smallest offset wins.
pub fn closest_on_x(graph: &Graph, nodes: &[NodeId], point: Point) -> Option<NodeId> {
    closest_on_axis(nodes, |n| (graph.pos(n).x - point.x).abs())
}

/// The node closest to `point` along the y axis.  See [`closest_on_x`].
pub fn closest_on_y(graph: &Graph, nodes: &[NodeId], point: Point) -> Option<NodeId> {
    closest_on_axis(nodes, |n| (graph.pos(n).y - point.y).abs())
}

fn closest_on_axis(nodes: &[NodeId], offset: impl Fn(NodeId) -> f64) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &n in nodes {
        let d = offset(n);
        if d == 0.0 {
            return Some(n);
        }
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((n, d));
        }
    }
    best.map(|(n, _)| n)
}

/// Of the x-nearest and y-nearest candidates, the one closer to `point` in
/// straight-line distance (the x candidate wins a tie).
fn closer_of_axis_nearest(graph: &Graph, nodes: &[NodeId], point: Point) -> Option<NodeId> {
    let cx = closest_on_x(graph, nodes, point)?;
    let cy = closest_on_y(graph, nodes, point)?;
    let dx = point.distance(graph.pos(cx));
    let dy = point.distance(graph.pos(cy));
    Some(if dx <= dy { cx } else { cy })
}

// ── Direction filter ──────────────────────────────────────────────────────────

/// `true` if `node` has an out-edge moving more than `min_offset` units in
/// `direction`.  An offset of exactly `min_offset` does not count.
pub fn has_out_edge_in_direction(
    graph: &Graph,
    node: NodeId,
    direction: Direction,
    min_offset: f64,
) -> bool {
    let from = graph.pos(node);
    graph.out_edges(node).iter().any(|&t| {
        let to = graph.pos(t);
        match direction {
            Direction::Up    => from.y - to.y > min_offset,
            Direction::Down  => to.y - from.y > min_offset,
            Direction::Left  => from.x - to.x > min_offset,
            Direction::Right => to.x - from.x > min_offset,
        }
    })
}

/// Nodes from `nodes` that have an out-edge in `direction`.
pub fn in_direction(
    graph: &Graph,
    nodes: &[NodeId],
    direction: Direction,
    min_offset: f64,
) -> Vec<NodeId> {
    nodes
        .iter()
        .copied()
        .filter(|&n| has_out_edge_in_direction(graph, n, direction, min_offset))
        .collect()
}

// ── Vehicle entry point ───────────────────────────────────────────────────────

/// The node where a vehicle at `vehicle` should enter the graph.
///
/// Candidates lie within `search_range` across the heading (both sides) and
/// within `search_range` ahead of the vehicle along it (nothing behind), and
/// must have an out-edge going the way the vehicle faces.  Returns the
/// Euclidean-nearest candidate, or `None` if there is none.
pub fn nearest_in_direction(
    graph: &Graph,
    vehicle: &VehicleState,
    search_range: f64,
    min_offset: f64,
) -> Option<NodeId> {
    let pos = vehicle.position();
    let direction = vehicle.direction();
    let r = search_range;

    // (left, right, above, below)
    let (left, right, above, below) = match direction {
        Direction::Up    => (r, r, r, 0.0),
        Direction::Down  => (r, r, 0.0, r),
        Direction::Left  => (r, 0.0, r, r),
        Direction::Right => (0.0, r, r, r),
    };

    let candidates = graph.nodes_in_box(pos, left, right, above, below);
    let candidates = in_direction(graph, &candidates, direction, min_offset);

    let mut best: Option<(NodeId, f64)> = None;
    for n in candidates {
        let d = pos.distance(graph.pos(n));
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((n, d));
        }
    }
    best.map(|(n, _)| n)
}

// ── Snapping ──────────────────────────────────────────────────────────────────

/// Resolve `point` to a graph node.
///
/// An exact coordinate match is used as is.  Otherwise the candidates are
/// the nodes inside the `±snap_range` box around `point`, and the result is
/// whichever of the x-nearest and y-nearest candidates is closer in
/// straight-line distance.  Returns `None` when the box is empty, and for a
/// negative or NaN `snap_range`.
pub fn snap_to_node(graph: &Graph, point: Point, snap_range: f64) -> Option<NodeId> {
    if !(snap_range >= 0.0) {
        return None;
    }
    if let Some(id) = graph.find(point) {
        return Some(id);
    }
    let r = snap_range;
    let candidates = graph.nodes_in_box(point, r, r, r, r);
    closer_of_axis_nearest(graph, &candidates, point)
}
