//! Road network representation.
//!
//! # Data layout
//!
//! Nodes live in a single arena (`Vec<Node>`) and are addressed by
//! [`NodeId`].  Edges are stored on both endpoints: every out-edge `a → b`
//! appears in `a.out_edges` and, as a back-reference, in `b.in_edges`.  The
//! graph is the only owner of its nodes, so ids never dangle.
//!
//! Two secondary indexes are kept in sync with the arena:
//!
//! - a coordinate map (`FxHashMap<CoordKey, NodeId>`): a node *is* its
//!   coordinate, so inserting a known coordinate returns the existing id;
//! - an R-tree (via `rstar`) over node positions, used for the box
//!   queries that snapping and heading search start from.
//!
//! # Search state
//!
//! Shortest-path bookkeeping (`distance`, `visited`) is not stored on the
//! nodes.  Each search builds a fresh [`SearchState`], so a `&Graph` can be
//! searched from several places at once and no reset step is needed.

use rstar::{RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};

use rn_core::{CoordKey, NodeId, Point};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index.
#[derive(Clone, Debug)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A graph vertex at a fixed coordinate.
#[derive(Clone, Debug)]
pub struct Node {
    /// Position of the node.  Unique within its graph.
    pub pos: Point,
    out_edges: Vec<NodeId>,
    in_edges: Vec<NodeId>,
}

impl Node {
    fn new(pos: Point) -> Self {
        Self { pos, out_edges: Vec::new(), in_edges: Vec::new() }
    }

    /// Targets of the outgoing edges, in insertion order.
    #[inline]
    pub fn out_edges(&self) -> &[NodeId] {
        &self.out_edges
    }

    /// Sources of the incoming edges.
    #[inline]
    pub fn in_edges(&self) -> &[NodeId] {
        &self.in_edges
    }

    #[inline]
    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed road graph keyed by coordinate.
#[derive(Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    index: FxHashMap<CoordKey, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            spatial_idx: RTree::new(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::out_degree).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Node access ───────────────────────────────────────────────────────

    /// `true` if `id` addresses a node of this graph.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// # Panics
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Position of `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()].pos
    }

    #[inline]
    pub fn out_edges(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].out_edges
    }

    #[inline]
    pub fn in_edges(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].in_edges
    }

    #[inline]
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.nodes[id.index()].out_edges.len()
    }

    /// Exact-coordinate lookup.
    #[inline]
    pub fn get_node(&self, x: f64, y: f64) -> Option<NodeId> {
        self.find(Point::new(x, y))
    }

    #[inline]
    pub fn find(&self, pos: Point) -> Option<NodeId> {
        self.index.get(&pos.key()).copied()
    }

    /// All node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Euclidean length of the edge `from → to` (whether or not it exists).
    #[inline]
    pub fn edge_length(&self, from: NodeId, to: NodeId) -> f64 {
        self.pos(from).distance(self.pos(to))
    }

    /// Length of a node sequence, summed from the first node onwards.
    ///
    /// The summation order matches the order in which a shortest-path search
    /// accumulates distances, so a route and its recomputed length agree
    /// bit for bit.
    pub fn path_length(&self, nodes: &[NodeId]) -> f64 {
        nodes
            .windows(2)
            .fold(0.0, |acc, w| acc + self.edge_length(w[0], w[1]))
    }

    /// Coordinates of a node sequence.
    pub fn points(&self, nodes: &[NodeId]) -> Vec<Point> {
        nodes.iter().map(|&n| self.pos(n)).collect()
    }

    /// Nodes inside the box `[c.x - left, c.x + right] × [c.y - above,
    /// c.y + below]` (bounds inclusive), in arena order.
    pub fn nodes_in_box(
        &self,
        center: Point,
        left: f64,
        right: f64,
        above: f64,
        below: f64,
    ) -> Vec<NodeId> {
        let envelope = AABB::from_corners(
            [center.x - left, center.y - above],
            [center.x + right, center.y + below],
        );
        let mut ids: Vec<NodeId> = self
            .spatial_idx
            .locate_in_envelope(&envelope)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert a node at `pos`, or return the node already there.
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        if let Some(id) = self.find(pos) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(pos));
        self.index.insert(pos.key(), id);
        self.spatial_idx.insert(NodeEntry { point: [pos.x, pos.y], id });
        id
    }

    /// Add the directed edge `from → to`.  Returns `false` if it already
    /// existed.
    ///
    /// # Panics
    /// Panics if either id does not belong to this graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        if self.nodes[from.index()].out_edges.contains(&to) {
            return false;
        }
        self.nodes[from.index()].out_edges.push(to);
        self.nodes[to.index()].in_edges.push(from);
        true
    }

    /// Insert both endpoints (if needed) and the edge between them.
    pub fn connect(&mut self, from: Point, to: Point) -> (NodeId, NodeId) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.add_edge(a, b);
        (a, b)
    }

    /// Remove the directed edge `from → to`.  Returns `false` if absent.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let out = &mut self.nodes[from.index()].out_edges;
        let Some(i) = out.iter().position(|&n| n == to) else {
            return false;
        };
        out.remove(i);
        self.nodes[to.index()].in_edges.retain(|&n| n != from);
        true
    }

    /// Remove every outgoing edge of `id`.
    pub fn clear_out_edges(&mut self, id: NodeId) {
        let targets = std::mem::take(&mut self.nodes[id.index()].out_edges);
        for t in targets {
            self.nodes[t.index()].in_edges.retain(|&n| n != id);
        }
    }

    /// Merge node `id` of `other` into this graph.
    ///
    /// A coordinate that is already present is never duplicated; instead the
    /// incoming node's out-edges are folded into the existing node, and each
    /// edge target is merged the same way.  The walk follows out-edges
    /// transitively and visits every node of `other` at most once, so cyclic
    /// graphs terminate.  Returns the id of the merged node in `self`.
    pub fn merge_node(&mut self, other: &Graph, id: NodeId) -> NodeId {
        let mut done = FxHashSet::default();
        self.merge_reachable(other, id, &mut done)
    }

    /// Merge every node of `other` into this graph.
    pub fn add_graph(&mut self, other: &Graph) {
        let mut done = FxHashSet::default();
        for id in other.ids() {
            self.merge_reachable(other, id, &mut done);
        }
    }

    fn merge_reachable(
        &mut self,
        other: &Graph,
        root: NodeId,
        done: &mut FxHashSet<NodeId>,
    ) -> NodeId {
        let merged_root = self.add_node(other.pos(root));
        let mut stack = vec![root];
        while let Some(theirs) = stack.pop() {
            if !done.insert(theirs) {
                continue;
            }
            let here = self.add_node(other.pos(theirs));
            for &target in other.out_edges(theirs) {
                let there = self.add_node(other.pos(target));
                self.add_edge(here, there);
                if !done.contains(&target) {
                    stack.push(target);
                }
            }
        }
        merged_root
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}

// ── SearchState ───────────────────────────────────────────────────────────────

/// Per-search bookkeeping for one shortest-path computation.
///
/// Indexed by `NodeId`.  A freshly built state has every distance at `+∞`
/// and nothing visited.
#[derive(Clone, Debug)]
pub struct SearchState {
    pub distance: Vec<f64>,
    pub visited: Vec<bool>,
}

impl SearchState {
    pub fn new(graph: &Graph) -> Self {
        let n = graph.node_count();
        Self {
            distance: vec![f64::INFINITY; n],
            visited: vec![false; n],
        }
    }

    /// Put every node back to `(+∞, unvisited)`.
    pub fn reset(&mut self) {
        self.distance.fill(f64::INFINITY);
        self.visited.fill(false);
    }

    /// The unvisited node with the smallest finite distance.
    ///
    /// Linear scan; the lowest id wins ties.  `None` once every reachable
    /// node has been visited.
    pub fn closest_unvisited(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (i, (&d, &seen)) in self.distance.iter().zip(&self.visited).enumerate() {
            if seen || d == f64::INFINITY {
                continue;
            }
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((NodeId(i as u32), d));
            }
        }
        best.map(|(id, _)| id)
    }
}
