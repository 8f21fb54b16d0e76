//! Unit tests for rn-graph.
//!
//! All tests use hand-crafted or seeded random graphs so they run without
//! any graph file on disk.

#[cfg(test)]
mod helpers {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rn_core::{NodeId, Point};

    use crate::Graph;

    pub fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// `(0,0) → (0,10) → (10,10)`.
    pub fn corner_graph() -> (Graph, [NodeId; 3]) {
        let mut g = Graph::new();
        let (a, b) = g.connect(p(0.0, 0.0), p(0.0, 10.0));
        let (_, c) = g.connect(p(0.0, 10.0), p(10.0, 10.0));
        (g, [a, b, c])
    }

    /// Primary route `s → m → t` (length 40) with two detours:
    ///
    /// ```text
    ///            u(20,10)      v(30,10)
    ///          ↗        ↘    ↗        ↘
    ///   s(0,0) ──→ m(20,0) ──────────→ t(40,0)
    /// ```
    ///
    /// - `s → u → t`      ≈ 44.72
    /// - `s → m → v → t`  ≈ 48.28
    pub fn detour_graph() -> (Graph, [NodeId; 5]) {
        let mut g = Graph::new();
        let s = g.add_node(p(0.0, 0.0));
        let m = g.add_node(p(20.0, 0.0));
        let t = g.add_node(p(40.0, 0.0));
        let u = g.add_node(p(20.0, 10.0));
        let v = g.add_node(p(30.0, 10.0));
        g.add_edge(s, m);
        g.add_edge(m, t);
        g.add_edge(s, u);
        g.add_edge(u, t);
        g.add_edge(m, v);
        g.add_edge(v, t);
        (g, [s, m, t, u, v])
    }

    /// Primary route `s → a → t` (length 20).  Every detour leaves through
    /// `b`, and each level of branching only shows up on the detour found
    /// one level earlier:
    ///
    /// ```text
    ///   s(0,0)  a(10,0)  t(20,0)  b(0,10)  c(10,10)  d(10,20)  e(20,20)
    ///
    ///   s → a → t    s → b    b → c → t    b → d → t    d → e → t
    /// ```
    ///
    /// - depth 1: `s → b → c → t`      ≈ 34.14
    /// - depth 2: `s → b → d → t`      ≈ 46.50
    /// - depth 3: `s → b → d → e → t`  ≈ 54.14
    pub fn ladder_graph() -> (Graph, [NodeId; 7]) {
        let mut g = Graph::new();
        let s = g.add_node(p(0.0, 0.0));
        let a = g.add_node(p(10.0, 0.0));
        let t = g.add_node(p(20.0, 0.0));
        let b = g.add_node(p(0.0, 10.0));
        let c = g.add_node(p(10.0, 10.0));
        let d = g.add_node(p(10.0, 20.0));
        let e = g.add_node(p(20.0, 20.0));
        for (from, to) in [(s, a), (a, t), (s, b), (b, c), (c, t), (b, d), (d, t), (d, e), (e, t)] {
            g.add_edge(from, to);
        }
        (g, [s, a, t, b, c, d, e])
    }

    /// Seeded random graph on a 10 × 10 lattice with 10-unit spacing.
    pub fn random_graph(seed: u64, nodes: usize, edges: usize) -> Graph {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g = Graph::new();
        while g.node_count() < nodes {
            let x = rng.gen_range(0..10) as f64 * 10.0;
            let y = rng.gen_range(0..10) as f64 * 10.0;
            g.add_node(p(x, y));
        }
        for _ in 0..edges {
            let a = NodeId(rng.gen_range(0..nodes as u32));
            let b = NodeId(rng.gen_range(0..nodes as u32));
            if a != b {
                g.add_edge(a, b);
            }
        }
        g
    }
}

// ── Graph store ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::helpers::{corner_graph, p};
    use crate::query::{range_x, range_y};
    use crate::{Graph, SearchState};

    #[test]
    fn empty_graph() {
        let g = Graph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert_eq!(g.get_node(0.0, 0.0), None);
    }

    #[test]
    fn add_node_never_duplicates() {
        let mut g = Graph::new();
        let a = g.add_node(p(1.0, 2.0));
        let b = g.add_node(p(1.0, 2.0));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.get_node(1.0, 2.0), Some(a));
    }

    #[test]
    fn edges_keep_back_references() {
        let (g, [a, b, c]) = corner_graph();
        assert_eq!(g.out_edges(a), &[b]);
        assert_eq!(g.in_edges(b), &[a]);
        assert_eq!(g.in_edges(c), &[b]);
        assert!(g.in_edges(a).is_empty());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn duplicate_edge_ignored() {
        let (mut g, [a, b, _]) = corner_graph();
        assert!(!g.add_edge(a, b));
        assert_eq!(g.out_degree(a), 1);
        assert_eq!(g.in_edges(b).len(), 1);
    }

    #[test]
    fn remove_and_clear_edges() {
        let (mut g, [a, b, c]) = corner_graph();
        g.add_edge(a, c);
        assert!(g.remove_edge(a, b));
        assert!(!g.remove_edge(a, b));
        assert!(g.in_edges(b).is_empty());

        g.clear_out_edges(a);
        assert_eq!(g.out_degree(a), 0);
        assert_eq!(g.in_edges(c), &[b]);
    }

    #[test]
    fn merge_folds_edges_into_existing_node() {
        let (mut g, [a, ..]) = corner_graph();

        let mut other = Graph::new();
        let (oa, _) = other.connect(p(0.0, 0.0), p(5.0, 0.0));
        other.connect(p(5.0, 0.0), p(5.0, 5.0));

        let merged = g.merge_node(&other, oa);
        assert_eq!(merged, a);
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.out_degree(a), 2);
        // The edge target's own out-edges come along.
        let five = g.get_node(5.0, 0.0).unwrap();
        assert_eq!(g.pos(g.out_edges(five)[0]), p(5.0, 5.0));
    }

    #[test]
    fn merge_terminates_on_cycles() {
        let mut other = Graph::new();
        let (x, _) = other.connect(p(0.0, 0.0), p(1.0, 0.0));
        other.connect(p(1.0, 0.0), p(0.0, 0.0));

        let mut g = Graph::new();
        g.merge_node(&other, x);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn add_graph_deduplicates() {
        let (mut g, _) = corner_graph();
        let (copy, _) = corner_graph();
        g.add_graph(&copy);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);

        let mut extra = Graph::new();
        extra.connect(p(10.0, 10.0), p(0.0, 0.0));
        g.add_graph(&extra);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn box_query_matches_range_filters() {
        let g = super::helpers::random_graph(7, 40, 0);
        let all: Vec<_> = g.ids().collect();
        let c = p(45.0, 30.0);
        let expected = range_y(&g, &range_x(&g, &all, c, 20.0, 5.0), c, 0.0, 30.0);
        assert_eq!(g.nodes_in_box(c, 20.0, 5.0, 0.0, 30.0), expected);
    }

    #[test]
    fn search_state_selection_and_reset() {
        let (g, [a, b, c]) = corner_graph();
        let mut state = SearchState::new(&g);
        assert_eq!(state.closest_unvisited(), None);

        state.distance[b.index()] = 3.0;
        state.distance[c.index()] = 3.0;
        state.distance[a.index()] = 1.0;
        state.visited[a.index()] = true;
        // Ties go to the lower id.
        assert_eq!(state.closest_unvisited(), Some(b));

        state.reset();
        assert!(state.distance.iter().all(|d| d.is_infinite()));
        assert!(state.visited.iter().all(|v| !v));
        assert_eq!(state.closest_unvisited(), None);
    }

    #[test]
    fn path_length_sums_edges() {
        let (g, nodes) = corner_graph();
        assert_eq!(g.path_length(&nodes), 20.0);
        assert_eq!(g.path_length(&nodes[..1]), 0.0);
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod query {
    use rn_core::{Direction, VehicleState};

    use super::helpers::{corner_graph, p};
    use crate::query::*;
    use crate::Graph;

    #[test]
    fn asymmetric_ranges() {
        let (g, [a, b, c]) = corner_graph();
        let all = [a, b, c];
        // x in [0 - 0, 0 + 5]
        assert_eq!(range_x(&g, &all, p(0.0, 0.0), 0.0, 5.0), vec![a, b]);
        // x in [10 - 10, 10 + 0]
        assert_eq!(range_x(&g, &all, p(10.0, 0.0), 10.0, 0.0), vec![a, b, c]);
        // y in [10 - 0, 10 + 100]
        assert_eq!(range_y(&g, &all, p(0.0, 10.0), 0.0, 100.0), vec![b, c]);
        // y in [5 - 5, 5 + 4]
        assert_eq!(range_y(&g, &all, p(0.0, 5.0), 5.0, 4.0), vec![a]);
    }

    #[test]
    fn closest_on_axis_short_circuits_on_exact_match() {
        let (g, [a, b, c]) = corner_graph();
        assert_eq!(closest_on_x(&g, &[c, a, b], p(0.0, 99.0)), Some(a));
        assert_eq!(closest_on_y(&g, &[a, c, b], p(50.0, 10.0)), Some(c));
        assert_eq!(closest_on_x(&g, &[], p(0.0, 0.0)), None);
    }

    #[test]
    fn closest_on_axis_first_wins_ties() {
        let (g, [a, b, c]) = corner_graph();
        // a and b are both 3 away on x.
        assert_eq!(closest_on_x(&g, &[b, a, c], p(3.0, 0.0)), Some(b));
        assert_eq!(closest_on_x(&g, &[a, b, c], p(3.0, 0.0)), Some(a));
    }

    #[test]
    fn direction_offset_is_strict() {
        let mut g = Graph::new();
        let (five, _) = g.connect(p(0.0, 100.0), p(0.0, 95.0));
        let (six, _) = g.connect(p(50.0, 100.0), p(50.0, 94.0));
        assert!(!has_out_edge_in_direction(&g, five, Direction::Up, 5.0));
        assert!(has_out_edge_in_direction(&g, six, Direction::Up, 5.0));
        assert!(!has_out_edge_in_direction(&g, six, Direction::Down, 5.0));

        let (right, _) = g.connect(p(200.0, 0.0), p(206.0, 0.0));
        assert!(has_out_edge_in_direction(&g, right, Direction::Right, 5.0));
        assert!(!has_out_edge_in_direction(&g, right, Direction::Left, 5.0));
        let (left, _) = g.connect(p(300.0, 0.0), p(295.0, 0.0));
        assert!(!has_out_edge_in_direction(&g, left, Direction::Left, 5.0));
    }

    /// Vehicle at (100, 100).  Nodes around it, each with one edge.
    fn heading_graph() -> Graph {
        let mut g = Graph::new();
        g.connect(p(100.0, 60.0), p(100.0, 40.0)); // ahead when facing up, edge up
        g.connect(p(100.0, 80.0), p(100.0, 50.0)); // closer, edge up
        g.connect(p(100.0, 130.0), p(100.0, 110.0)); // behind when facing up
        g.connect(p(110.0, 90.0), p(140.0, 90.0)); // edge right
        g.connect(p(130.0, 100.0), p(160.0, 100.0)); // ahead when facing right
        g
    }

    #[test]
    fn nearest_facing_up() {
        let g = heading_graph();
        let v = VehicleState::from_degrees(100.0, 100.0, 270.0);
        let n = nearest_in_direction(&g, &v, 100.0, 5.0).unwrap();
        assert_eq!(g.pos(n), p(100.0, 80.0));
    }

    #[test]
    fn nearest_facing_right() {
        let g = heading_graph();
        let v = VehicleState::from_degrees(100.0, 100.0, 10.0);
        let n = nearest_in_direction(&g, &v, 100.0, 5.0).unwrap();
        // (110, 90) is closer than (130, 100).
        assert_eq!(g.pos(n), p(110.0, 90.0));
    }

    #[test]
    fn nothing_ahead_is_none() {
        let g = heading_graph();
        // Facing left: no node to the left has a leftward edge.
        let v = VehicleState::from_degrees(100.0, 100.0, 180.0);
        assert_eq!(nearest_in_direction(&g, &v, 100.0, 5.0), None);
        // Facing down with a tiny range: (100, 130) is out of reach.
        let v = VehicleState::from_degrees(100.0, 100.0, 90.0);
        assert_eq!(nearest_in_direction(&g, &v, 10.0, 5.0), None);
    }

    #[test]
    fn trailing_side_is_excluded() {
        let mut g = Graph::new();
        g.connect(p(100.0, 101.0), p(100.0, 80.0)); // 1 unit behind, edge up
        let v = VehicleState::from_degrees(100.0, 100.0, 270.0);
        assert_eq!(nearest_in_direction(&g, &v, 100.0, 5.0), None);
    }

    #[test]
    fn snap_prefers_exact_then_nearest() {
        let (g, [a, b, _]) = corner_graph();
        assert_eq!(snap_to_node(&g, p(0.0, 10.0), 20.0), Some(b));
        assert_eq!(snap_to_node(&g, p(1.0, 1.0), 20.0), Some(a));
        assert_eq!(snap_to_node(&g, p(1.0, 8.0), 20.0), Some(b));
    }

    #[test]
    fn snap_out_of_range() {
        let (g, _) = corner_graph();
        assert_eq!(snap_to_node(&g, p(100.0, 100.0), 20.0), None);
        // Exactly on the box edge still counts.
        assert!(snap_to_node(&g, p(30.0, 10.0), 20.0).is_some());
    }

    #[test]
    fn snap_with_negative_range_finds_nothing() {
        let (g, _) = corner_graph();
        assert_eq!(snap_to_node(&g, p(1.0, 1.0), -20.0), None);
        assert_eq!(snap_to_node(&g, p(0.0, 0.0), -1.0), None);
        assert_eq!(snap_to_node(&g, p(1.0, 1.0), f64::NAN), None);
    }
}

// ── Shortest paths ────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rn_core::NodeId;

    use super::helpers::{corner_graph, detour_graph, p, random_graph};
    use crate::{shortest_path, DijkstraRouter, Router, SpatialError};

    #[test]
    fn corner_route() {
        let (g, _) = corner_graph();
        let r = shortest_path(&g, &DijkstraRouter, p(0.0, 0.0), p(10.0, 10.0), 20.0).unwrap();
        assert_eq!(r.points(&g), vec![p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0)]);
        assert_eq!(r.length, 20.0);
    }

    #[test]
    fn snapped_endpoints() {
        let (g, _) = corner_graph();
        let r = shortest_path(&g, &DijkstraRouter, p(1.0, 1.0), p(9.0, 11.0), 20.0).unwrap();
        assert_eq!(r.points(&g), vec![p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0)]);
    }

    #[test]
    fn trivial_same_node() {
        let (g, [a, ..]) = corner_graph();
        let r = DijkstraRouter.route(&g, a, a).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.length, 0.0);

        let r = shortest_path(&g, &DijkstraRouter, p(0.0, 0.0), p(0.0, 0.0), 20.0).unwrap();
        assert!(r.is_trivial());
    }

    #[test]
    fn unreachable_is_not_trivial() {
        let (mut g, [a, _, c]) = corner_graph();
        g.clear_out_edges(a);
        let result = DijkstraRouter.route(&g, a, c);
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));
        assert!(result.unwrap_err().is_no_path());
    }

    #[test]
    fn one_way_blocks_return() {
        let (g, [a, _, c]) = corner_graph();
        assert!(DijkstraRouter.route(&g, a, c).is_ok());
        assert!(DijkstraRouter.route(&g, c, a).is_err());
    }

    #[test]
    fn snap_failure_is_no_path() {
        let (g, _) = corner_graph();
        let err = shortest_path(&g, &DijkstraRouter, p(0.0, 0.0), p(500.0, 500.0), 20.0)
            .unwrap_err();
        assert!(matches!(err, SpatialError::SnapFailed { .. }));
        assert!(err.is_no_path());

        let err = shortest_path(&g, &DijkstraRouter, p(1.0, 1.0), p(9.0, 11.0), -20.0)
            .unwrap_err();
        assert!(matches!(err, SpatialError::SnapFailed { .. }));
    }

    #[test]
    fn unknown_node_rejected() {
        let (g, [a, ..]) = corner_graph();
        let err = DijkstraRouter.route(&g, a, NodeId(99)).unwrap_err();
        assert!(matches!(err, SpatialError::NodeNotFound(NodeId(99))));
        assert!(!err.is_no_path());
    }

    #[test]
    fn branches_are_untaken_siblings() {
        let (g, [s, m, t, u, v]) = detour_graph();
        let r = DijkstraRouter.route(&g, s, t).unwrap();
        assert_eq!(r.nodes, vec![s, m, t]);
        assert_eq!(r.length, 40.0);
        // Collected from the end backwards: m's sibling first, then s's.
        assert_eq!(r.branches, vec![v, u]);
    }

    #[test]
    fn route_length_matches_path_length() {
        let g = random_graph(11, 30, 120);
        for a in g.ids() {
            for b in g.ids() {
                if let Ok(r) = DijkstraRouter.route(&g, a, b) {
                    assert_eq!(r.length, g.path_length(&r.nodes));
                    if !r.is_trivial() {
                        assert_eq!(r.nodes.first(), Some(&a));
                        assert_eq!(r.nodes.last(), Some(&b));
                    }
                }
            }
        }
    }

    #[test]
    fn triangle_inequality() {
        for seed in 0..5 {
            let g = random_graph(seed, 15, 60);
            let ids: Vec<_> = g.ids().collect();
            for &a in &ids {
                for &b in &ids {
                    for &c in &ids {
                        let (Ok(ab), Ok(bc), Ok(ac)) = (
                            DijkstraRouter.route(&g, a, b),
                            DijkstraRouter.route(&g, b, c),
                            DijkstraRouter.route(&g, a, c),
                        ) else {
                            continue;
                        };
                        assert!(
                            ac.length <= ab.length + bc.length + 1e-9,
                            "seed {seed}: d({a},{c})={} > d({a},{b})+d({b},{c})={}",
                            ac.length,
                            ab.length + bc.length,
                        );
                    }
                }
            }
        }
    }
}

// ── Alternative routes ────────────────────────────────────────────────────────

#[cfg(test)]
mod alternatives {
    use std::collections::HashSet;

    use rn_core::PlannerConfig;

    use super::helpers::{corner_graph, detour_graph, ladder_graph, random_graph};
    use crate::{AlternativeSearch, DijkstraRouter, Router};

    #[test]
    fn detours_ranked_by_length() {
        let (g, [s, m, t, u, v]) = detour_graph();
        let alts = AlternativeSearch::new(&g, &DijkstraRouter).run(s, t).unwrap();
        let routes: Vec<_> = alts.iter().map(|a| a.nodes.clone()).collect();
        assert_eq!(routes, vec![vec![s, u, t], vec![s, m, v, t]]);
        assert!((alts[0].length - 2.0 * 500f64.sqrt()).abs() < 1e-9);
        assert!((alts[1].length - (20.0 + 2.0 * 200f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn each_level_branches_off_the_previous_detour() {
        let (g, [s, _, t, b, c, d, e]) = ladder_graph();
        let routes = |depth| -> Vec<Vec<_>> {
            AlternativeSearch::new(&g, &DijkstraRouter)
                .max_depth(depth)
                .run(s, t)
                .unwrap()
                .into_iter()
                .map(|alt| alt.nodes)
                .collect()
        };

        assert_eq!(routes(1), vec![vec![s, b, c, t]]);
        assert_eq!(routes(2), vec![vec![s, b, c, t], vec![s, b, d, t]]);
        assert_eq!(
            routes(3),
            vec![vec![s, b, c, t], vec![s, b, d, t], vec![s, b, d, e, t]],
        );
        assert_eq!(routes(4), routes(3));
    }

    #[test]
    fn spliced_length_covers_every_leg() {
        let (g, [s, _, t, ..]) = ladder_graph();
        let alts = AlternativeSearch::new(&g, &DijkstraRouter).run(s, t).unwrap();
        let r2 = 2f64.sqrt();
        let expected = [10.0 + 10.0 + 10.0 * r2, 10.0 + 10.0 * r2 + 10.0 * 5f64.sqrt(), 40.0 + 10.0 * r2];
        assert_eq!(alts.len(), expected.len());
        for (alt, want) in alts.iter().zip(expected) {
            assert!((alt.length - want).abs() < 1e-9, "{:?}: {} != {want}", alt.nodes, alt.length);
        }
    }

    #[test]
    fn no_branches_no_alternatives() {
        let (g, [a, _, c]) = corner_graph();
        let alts = AlternativeSearch::new(&g, &DijkstraRouter).run(a, c).unwrap();
        assert!(alts.is_empty());
    }

    #[test]
    fn trivial_primary_has_no_alternatives() {
        let (g, [s, ..]) = detour_graph();
        assert!(AlternativeSearch::new(&g, &DijkstraRouter).run(s, s).unwrap().is_empty());
    }

    #[test]
    fn unreachable_primary_is_an_error() {
        let (g, [s, _, t, ..]) = detour_graph();
        assert!(AlternativeSearch::new(&g, &DijkstraRouter).run(t, s).is_err());
    }

    #[test]
    fn limits_from_config() {
        let (g, [s, _, t, u, _]) = detour_graph();
        let cfg = PlannerConfig { max_alternatives: Some(1), ..PlannerConfig::default() };
        let alts = AlternativeSearch::with_config(&g, &DijkstraRouter, &cfg).run(s, t).unwrap();
        assert_eq!(alts.len(), 1);
        assert_eq!(alts[0].nodes, vec![s, u, t]);

        let none = AlternativeSearch::new(&g, &DijkstraRouter).max_depth(0).run(s, t).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn deeper_search_only_adds_routes() {
        let g = random_graph(3, 15, 35);
        let ids: Vec<_> = g.ids().collect();
        for &a in &ids[..5] {
            for &b in &ids {
                let Ok(shallow) = AlternativeSearch::new(&g, &DijkstraRouter).max_depth(1).run(a, b)
                else {
                    continue;
                };
                let deep = AlternativeSearch::new(&g, &DijkstraRouter).run(a, b).unwrap();
                let deep_set: HashSet<_> = deep.iter().map(|x| x.nodes.clone()).collect();
                assert!(shallow.iter().all(|x| deep_set.contains(&x.nodes)));
            }
        }
    }

    #[test]
    fn never_shorter_sorted_and_unique() {
        for seed in 20..23 {
            let g = random_graph(seed, 12, 30);
            let ids: Vec<_> = g.ids().collect();
            for &a in &ids {
                for &b in &ids {
                    let Ok(primary) = DijkstraRouter.route(&g, a, b) else { continue };
                    let alts = AlternativeSearch::new(&g, &DijkstraRouter).run(a, b).unwrap();

                    let mut seen = HashSet::new();
                    seen.insert(primary.nodes.clone());
                    for w in alts.windows(2) {
                        assert!(w[0].length <= w[1].length, "seed {seed}: not sorted");
                    }
                    for alt in &alts {
                        assert!(alt.length >= primary.length, "seed {seed}: shorter alternative");
                        assert!(seen.insert(alt.nodes.clone()), "seed {seed}: duplicate route");
                        assert_eq!(alt.nodes.first(), Some(&a));
                        assert_eq!(alt.nodes.last(), Some(&b));
                        for e in alt.nodes.windows(2) {
                            assert!(g.out_edges(e[0]).contains(&e[1]), "seed {seed}: broken edge");
                        }
                    }
                }
            }
        }
    }
}

// ── Text format ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod format {
    use std::collections::BTreeSet;

    use super::helpers::{p, random_graph};
    use crate::{load_graph, parse_graph, save_graph, write_graph, Graph, SpatialError};

    const SAMPLE: &str = "\
# track section
NODE
    1780,3750
    1780,3900 ; 1900, 3750
ENDNODE

NODE
    1780,3900
    1900,3750
ENDNODE
";

    fn parse_err_line(text: &str) -> usize {
        match parse_graph(text) {
            Err(SpatialError::Parse { line, .. }) => line,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    /// `(node, sorted out-edge set)` pairs, in file units.
    fn edge_sets(g: &Graph) -> BTreeSet<((i64, i64), Vec<(i64, i64)>)> {
        let mm = |q: rn_core::Point| ((q.x * 10.0).round() as i64, (q.y * 10.0).round() as i64);
        g.iter()
            .map(|(_, n)| {
                let mut out: Vec<_> = n.out_edges().iter().map(|&t| mm(g.pos(t))).collect();
                out.sort();
                (mm(n.pos), out)
            })
            .collect()
    }

    #[test]
    fn parses_sample() {
        let g = parse_graph(SAMPLE).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        let a = g.get_node(178.0, 375.0).unwrap();
        let b = g.get_node(178.0, 390.0).unwrap();
        let c = g.get_node(190.0, 375.0).unwrap();
        assert_eq!(g.out_edges(a), &[b, c]);
        assert_eq!(g.out_edges(b), &[c]);
        assert!(g.out_edges(c).is_empty());
    }

    #[test]
    fn syntax_errors_report_line() {
        assert_eq!(parse_err_line("NODE\nNODE\n"), 2);
        assert_eq!(parse_err_line("\n\nENDNODE\n"), 3);
        assert_eq!(parse_err_line("NODE\nENDNODE\n"), 2);
        assert_eq!(parse_err_line("NODE\n  12,a4\nENDNODE\n"), 2);
        assert_eq!(parse_err_line("NODE\n  1,2\n  3,4 ; x\nENDNODE\n"), 3);
        assert_eq!(parse_err_line("NODE\n  1,2,3\nENDNODE\n"), 2);
        assert_eq!(parse_err_line("12,4\n"), 1);
        assert_eq!(parse_err_line("# ok\nEDGE\n"), 2);
        assert_eq!(parse_err_line("NODE\n  1,2\n"), 2);
    }

    #[test]
    fn empty_input_is_empty_graph() {
        let g = parse_graph("# nothing here\n\n").unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn writes_expected_layout() {
        let mut g = Graph::new();
        g.connect(p(1.0, 2.0), p(3.0, 4.0));
        g.connect(p(1.0, 2.0), p(5.0, 6.0));
        let mut out = Vec::new();
        write_graph(&g, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("NODE\n    10,20\n    30,40 ; 50,60\nENDNODE\n\n"));
        assert!(text.contains("NODE\n    30,40\nENDNODE\n\n"));
    }

    #[test]
    fn save_rounds_up() {
        let mut g = Graph::new();
        g.add_node(p(0.01, 12.34));
        let mut out = Vec::new();
        write_graph(&g, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "NODE\n    1,124\nENDNODE\n\n");
    }

    #[test]
    fn file_round_trip() {
        let original = parse_graph(SAMPLE).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.txt");
        save_graph(&original, &path).unwrap();
        let reloaded = load_graph(&path).unwrap();
        assert_eq!(edge_sets(&original), edge_sets(&reloaded));
    }

    #[test]
    fn random_round_trip() {
        let original = random_graph(5, 30, 100);
        let mut out = Vec::new();
        write_graph(&original, &mut out).unwrap();
        let reloaded = parse_graph(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(edge_sets(&original), edge_sets(&reloaded));
        assert_eq!(original.node_count(), reloaded.node_count());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_graph(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, SpatialError::Io(_)));
    }
}
