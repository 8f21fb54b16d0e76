//! track: plan a reference path over a track graph from the command line.
//!
//! Loads a `NODE`/`ENDNODE` graph, enters it from a vehicle pose, routes
//! through the given waypoints and prints the path.  Optionally lists the
//! alternatives for one leg and checks the path against activated track
//! obstacles.
//!
//! ```text
//! track 300,700 100,400 --alternatives-for 1 --obstacles 0,3 -v
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info, warn};

use rn_core::{PlannerConfig, Point, VehicleState};
use rn_map::{Map, ObstacleSpec, OccupancyGrid, Toggle};
use rn_plan::{PathCoordinator, RefPath};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_GRAPH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/track.txt");
const DEFAULT_WAYPOINTS: [Point; 2] = [Point { x: 300.0, y: 700.0 }, Point { x: 100.0, y: 400.0 }];

/// Size of the track image, in cells of 1 cm.
const TRACK_WIDTH:  usize = 490;
const TRACK_HEIGHT: usize = 900;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "track")]
#[command(about = "Plan a reference path over a track graph")]
struct Cli {
    /// Waypoints as `x,y` in cm, visited in order
    #[arg(value_parser = parse_point)]
    waypoints: Vec<Point>,

    /// Graph file
    #[arg(long, default_value = DEFAULT_GRAPH)]
    graph: PathBuf,

    /// Vehicle x position (cm)
    #[arg(long, default_value_t = 90.0, allow_hyphen_values = true)]
    x: f64,

    /// Vehicle y position (cm)
    #[arg(long, default_value_t = 100.0, allow_hyphen_values = true)]
    y: f64,

    /// Vehicle heading in degrees, clockwise from +x
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    heading: f64,

    /// Snap radius for waypoints (cm)
    #[arg(long)]
    snap_range: Option<f64>,

    /// How far ahead of the vehicle to look for its entry node (cm)
    #[arg(long)]
    search_range: Option<f64>,

    /// Print the alternatives for the leg ending at this waypoint (1-based)
    #[arg(long)]
    alternatives_for: Option<usize>,

    /// Activate these track obstacles and report path points they cover
    #[arg(long, value_delimiter = ',')]
    obstacles: Vec<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let num = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}"));
    Ok(Point::from((num(x)?, num(y)?)))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .target(env_logger::Target::Stderr)
        .init();

    let mut config = PlannerConfig::default();
    if let Some(r) = cli.snap_range {
        config.snap_range = r;
    }
    if let Some(r) = cli.search_range {
        config.search_range = r;
    }

    let planner = PathCoordinator::load(&cli.graph, config)
        .with_context(|| format!("loading {}", cli.graph.display()))?;

    let waypoints = if cli.waypoints.is_empty() {
        DEFAULT_WAYPOINTS.to_vec()
    } else {
        cli.waypoints.clone()
    };
    let vehicle = VehicleState::from_degrees(cli.x, cli.y, cli.heading);
    info!("vehicle at {} facing {}", vehicle.position(), vehicle.direction());

    let path = planner.plan(&vehicle, &waypoints).context("planning reference path")?;
    print_path("reference path", &path.points);
    println!("waypoint indexes: {:?}", path.waypoint_indexes);
    println!("length: {:.1} cm", path.length());

    if let Some(leg) = cli.alternatives_for {
        print_alternatives(&planner, &path, leg)?;
    }

    if !cli.obstacles.is_empty() {
        check_obstacles(&path, &cli.obstacles)?;
    }
    Ok(())
}

fn print_path(title: &str, points: &[Point]) {
    println!("{title} ({} points):", points.len());
    for p in points {
        println!("  {p}");
    }
}

fn print_alternatives(planner: &PathCoordinator, path: &RefPath, leg: usize) -> Result<()> {
    if leg == 0 || leg >= path.waypoint_indexes.len() {
        bail!("--alternatives-for must name a waypoint between 1 and {}", path.waypoint_indexes.len() - 1);
    }
    let (start, end) = (path.waypoint_indexes[leg - 1], path.waypoint_indexes[leg]);
    let alternatives = planner.alternatives(&path.points, start, end)?;
    if alternatives.is_empty() {
        println!("no alternative for leg {leg}");
    }
    for (i, alt) in alternatives.iter().enumerate() {
        let length: f64 = alt.windows(2).map(|w| w[0].distance(w[1])).sum();
        print_path(&format!("alternative {} for leg {leg}, {length:.1} cm", i + 1), alt);
    }
    Ok(())
}

/// Activate `indexes` on an empty track and list path samples that land on
/// a non-free cell.
fn check_obstacles(path: &RefPath, indexes: &[usize]) -> Result<()> {
    let grid = OccupancyGrid::new(TRACK_WIDTH, TRACK_HEIGHT);
    let mut map = Map::new(grid, ObstacleSpec::track_catalog())?;
    for &i in indexes {
        match map.toggle_obstacle(i) {
            Some(Toggle::Activated) => info!("obstacle {i} activated"),
            Some(Toggle::Deactivated) => info!("obstacle {i} deactivated"),
            None => warn!("no obstacle {i} on this track"),
        }
    }

    let mut hits = 0;
    for w in path.points.windows(2) {
        let steps = w[0].distance(w[1]).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let p = Point::new(w[0].x + (w[1].x - w[0].x) * t, w[0].y + (w[1].y - w[0].y) * t);
            if map.cell_at(p.x, p.y).is_some_and(|c| !c.is_free()) {
                let owner = map.obstacle_at(p.x, p.y);
                warn!("path crosses an obstacle at {p} (obstacle {owner:?})");
                hits += 1;
            }
        }
    }
    println!("{hits} path samples blocked by obstacles");
    Ok(())
}
