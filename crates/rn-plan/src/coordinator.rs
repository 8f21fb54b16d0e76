//! `PathCoordinator`: reference paths and segment alternatives.
//!
//! # Planning
//!
//! 1. The vehicle enters the graph at the nearest node ahead of it that
//!    has an out-edge along its heading.
//! 2. Each waypoint is routed to from the end of the path so far.  The
//!    leg's first point is that end, so it is skipped when appending.
//! 3. After each leg the index of the path's last point is recorded, so
//!    `waypoint_indexes[k + 1]` is where waypoint `k` landed and
//!    `waypoint_indexes[0]` is always `0` (the entry node).
//!
//! A leg that cannot be routed fails the whole request.

use std::path::Path;

use log::{debug, info, warn};

use rn_core::{NodeId, PlannerConfig, Point, VehicleState};
use rn_graph::query::nearest_in_direction;
use rn_graph::{load_graph, shortest_path, AlternativeSearch, DijkstraRouter, Graph, Router};

use crate::{PlanError, PlanResult};

/// A planned path and where its waypoints fall on it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefPath {
    /// Graph node coordinates from the entry node to the last waypoint.
    pub points: Vec<Point>,
    /// Index into `points` of the entry node, then of every waypoint.
    pub waypoint_indexes: Vec<usize>,
}

impl RefPath {
    /// Euclidean length of the polyline.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Owns a road graph and plans over it with router `R`.
pub struct PathCoordinator<R: Router = DijkstraRouter> {
    graph: Graph,
    router: R,
    config: PlannerConfig,
}

impl PathCoordinator<DijkstraRouter> {
    /// Load a graph file and plan over it with the default router.
    pub fn load(path: &Path, config: PlannerConfig) -> PlanResult<Self> {
        let graph = load_graph(path)?;
        info!(
            "loaded {} nodes, {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        Self::new(graph, DijkstraRouter, config)
    }
}

impl<R: Router> PathCoordinator<R> {
    pub fn new(graph: Graph, router: R, config: PlannerConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self { graph, router, config })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Where a vehicle in state `vehicle` enters the graph, if anywhere.
    pub fn start_node(&self, vehicle: &VehicleState) -> Option<NodeId> {
        nearest_in_direction(
            &self.graph,
            vehicle,
            self.config.search_range,
            self.config.min_offset,
        )
    }

    /// Plan a path from the vehicle through `waypoints` in order.
    ///
    /// With no waypoints the path is just the entry node.
    pub fn plan(&self, vehicle: &VehicleState, waypoints: &[Point]) -> PlanResult<RefPath> {
        let Some(start) = self.start_node(vehicle) else {
            warn!("vehicle at {} is too far from any usable node", vehicle.position());
            return Err(PlanError::NoStartNode {
                position: vehicle.position(),
                direction: vehicle.direction(),
            });
        };

        let mut cursor = self.graph.pos(start);
        let mut points = vec![cursor];
        let mut waypoint_indexes = vec![0];

        for (waypoint, &point) in waypoints.iter().enumerate() {
            let route = shortest_path(&self.graph, &self.router, cursor, point, self.config.snap_range)
                .map_err(|source| {
                    info!("waypoint {waypoint} at {point} is out of reach: {source}");
                    PlanError::Unreachable { waypoint, point, source }
                })?;

            points.extend(route.nodes.iter().skip(1).map(|&n| self.graph.pos(n)));
            waypoint_indexes.push(points.len() - 1);
            cursor = points[points.len() - 1];
        }

        info!("planned {} points through {} waypoints", points.len(), waypoints.len());
        Ok(RefPath { points, waypoint_indexes })
    }

    /// Variants of `path` with the segment `[start_index, end_index]`
    /// replaced by each alternative route between its endpoints, shortest
    /// first.
    ///
    /// Both endpoints must be graph nodes.  An empty list means the segment
    /// has no alternative.
    pub fn alternatives(
        &self,
        path: &[Point],
        start_index: usize,
        end_index: usize,
    ) -> PlanResult<Vec<Vec<Point>>> {
        let len = path.len();
        for index in [start_index, end_index] {
            if index >= len {
                return Err(PlanError::IndexOutOfBounds { index, len });
            }
        }
        if start_index > end_index {
            return Err(PlanError::InvalidRange { start: start_index, end: end_index });
        }

        let from = self.node_at(path[start_index])?;
        let to = self.node_at(path[end_index])?;

        let found = AlternativeSearch::with_config(&self.graph, &self.router, &self.config)
            .run(from, to)?;
        debug!("{} alternatives for segment {start_index}..={end_index}", found.len());

        let head = &path[..start_index];
        let tail = &path[end_index + 1..];
        Ok(found
            .into_iter()
            .map(|alt| {
                let mut full = Vec::with_capacity(head.len() + alt.nodes.len() + tail.len());
                full.extend_from_slice(head);
                full.extend(self.graph.points(&alt.nodes));
                full.extend_from_slice(tail);
                full
            })
            .collect())
    }

    fn node_at(&self, point: Point) -> PlanResult<NodeId> {
        self.graph.find(point).ok_or(PlanError::NotOnGraph(point))
    }
}
