//! Alternative routes around a shortest path.
//!
//! Instead of enumerating k shortest paths, the search branches off the
//! primary route at the nodes where it could have gone another way (the
//! route's [`branches`](crate::Route::branches)).  For a branch candidate
//! `c` reached from boundary node `b`, the spliced route is
//!
//! ```text
//! prefix(start → b) + shortest(b → c) + shortest(c → end)
//! ```
//!
//! and the candidates of `shortest(c → end)` are expanded one level deeper
//! with `prefix(start → c)` as the new prefix.  Expansion runs from an
//! explicit FIFO queue and stops at `max_depth` levels (3 by default).
//!
//! The collected routes are ranked by length (stable), and exact duplicates
//! as well as the primary route itself are dropped.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use rn_core::{NodeId, PlannerConfig};

use crate::{Graph, Router, SpatialError};

/// A complete route from start to end that differs from the primary one.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub nodes: Vec<NodeId>,
    pub length: f64,
}

/// One pending level of expansion.
struct Expansion {
    depth: usize,
    /// Route from the start to the boundary node (its last element).
    prefix: Vec<NodeId>,
    candidates: Vec<NodeId>,
}

/// Bounded branch-and-splice search for alternative routes.
///
/// # Example
///
/// ```
/// use rn_core::Point;
/// use rn_graph::{AlternativeSearch, DijkstraRouter, Graph};
///
/// let mut g = Graph::new();
/// let (a, b) = g.connect(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
/// g.connect(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
/// g.connect(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
///
/// let alts = AlternativeSearch::new(&g, &DijkstraRouter).run(a, b).unwrap();
/// assert_eq!(alts.len(), 1);
/// assert_eq!(alts[0].nodes.len(), 3);
/// ```
pub struct AlternativeSearch<'a, R: Router + ?Sized> {
    graph: &'a Graph,
    router: &'a R,
    max_depth: usize,
    max_results: Option<usize>,
}

impl<'a, R: Router + ?Sized> AlternativeSearch<'a, R> {
    pub fn new(graph: &'a Graph, router: &'a R) -> Self {
        Self { graph, router, max_depth: 3, max_results: None }
    }

    /// Take the depth and result limits from `config`.
    pub fn with_config(graph: &'a Graph, router: &'a R, config: &PlannerConfig) -> Self {
        Self::new(graph, router)
            .max_depth(config.max_alt_depth)
            .max_results(config.max_alternatives)
    }

    /// Number of branch levels to expand.  `0` disables the search.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Keep at most `n` alternatives (the shortest ones).
    pub fn max_results(mut self, n: Option<usize>) -> Self {
        self.max_results = n;
        self
    }

    /// Alternatives to the shortest route `from → to`, shortest first.
    ///
    /// An empty list means no alternative exists.  Fails only if the
    /// primary route itself cannot be computed.
    pub fn run(&self, from: NodeId, to: NodeId) -> Result<Vec<Alternative>, SpatialError> {
        let primary = self.router.route(self.graph, from, to)?;
        if primary.is_trivial() || self.max_depth == 0 {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(Expansion {
            depth: 1,
            prefix: vec![from],
            candidates: primary.branches.clone(),
        });

        while let Some(item) = queue.pop_front() {
            let Some(&boundary) = item.prefix.last() else {
                continue;
            };
            for &candidate in &item.candidates {
                let Some((head, tail)) = self.legs(boundary, candidate, to) else {
                    log::trace!("depth {}: no detour via {candidate}", item.depth);
                    continue;
                };

                let mut reach = item.prefix.clone();
                reach.extend_from_slice(&head[1..]);

                let mut nodes = reach.clone();
                nodes.extend_from_slice(&tail.nodes[1..]);
                let length = self.graph.path_length(&nodes);
                found.push(Alternative { nodes, length });

                if item.depth < self.max_depth {
                    queue.push_back(Expansion {
                        depth: item.depth + 1,
                        prefix: reach,
                        candidates: tail.branches,
                    });
                }
            }
        }

        Ok(self.rank(found, &primary.nodes))
    }

    /// Non-trivial routes `boundary → candidate` and `candidate → to`.
    fn legs(
        &self,
        boundary: NodeId,
        candidate: NodeId,
        to: NodeId,
    ) -> Option<(Vec<NodeId>, crate::Route)> {
        let head = self.router.route(self.graph, boundary, candidate).ok()?;
        let tail = self.router.route(self.graph, candidate, to).ok()?;
        if head.is_trivial() || tail.is_trivial() {
            return None;
        }
        Some((head.nodes, tail))
    }

    fn rank(&self, mut found: Vec<Alternative>, primary: &[NodeId]) -> Vec<Alternative> {
        found.sort_by(|a, b| a.length.total_cmp(&b.length));

        let mut seen: FxHashSet<Vec<NodeId>> = FxHashSet::default();
        seen.insert(primary.to_vec());
        found.retain(|alt| seen.insert(alt.nodes.clone()));

        if let Some(n) = self.max_results {
            found.truncate(n);
        }
        found
    }
}
