//! `NODE`/`ENDNODE` graph text format.
//!
//! # Format
//!
//! ```text
//! # comment
//! NODE
//!     1780,3750
//!     1780,3900 ; 1900,3750
//! ENDNODE
//!
//! NODE
//!     1780,3900
//! ENDNODE
//! ```
//!
//! - All whitespace inside a line is ignored; blank lines and lines starting
//!   with `#` are skipped.
//! - `NODE` opens a declaration.  The first coordinate line is the node
//!   itself; any further coordinate lines list `;`-separated out-edge
//!   targets.  `ENDNODE` closes the declaration.
//! - Coordinates are non-negative integers in millimetres.  The graph works
//!   in centimetres: loading divides by [`FILE_UNITS_PER_CM`], saving
//!   multiplies and rounds up.
//! - Edge targets need not be declared themselves; they are created as
//!   nodes without out-edges.
//!
//! Any syntax error aborts the load and no graph is returned.  The error
//! carries the 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rn_core::{NodeId, Point};

use crate::{Graph, SpatialError};

/// File units per graph unit (mm per cm).
pub const FILE_UNITS_PER_CM: f64 = 10.0;

/// Slack absorbed before rounding up on save, so that a coordinate loaded
/// from `n` mm is written back as `n`, not `n + 1`.
const ROUNDING_SLACK: f64 = 1e-9;

// ── Reading ───────────────────────────────────────────────────────────────────

/// Load a graph from a file.
pub fn load_graph(path: &Path) -> Result<Graph, SpatialError> {
    let file = File::open(path)?;
    read_graph(BufReader::new(file)).inspect_err(|e| {
        log::warn!("failed to load graph from {}: {e}", path.display());
    })
}

/// Parse a graph from an in-memory string.
pub fn parse_graph(text: &str) -> Result<Graph, SpatialError> {
    read_graph(text.as_bytes())
}

/// Like [`load_graph`] but accepts any buffered reader.
pub fn read_graph<R: BufRead>(reader: R) -> Result<Graph, SpatialError> {
    let mut parser = Parser::default();
    let mut last_line = 0;
    for (i, line) in reader.lines().enumerate() {
        last_line = i + 1;
        parser.line(last_line, &line?)?;
    }
    parser.finish(last_line)
}

#[derive(Default)]
struct Parser {
    graph: Graph,
    open: bool,
    current: Option<NodeId>,
}

impl Parser {
    fn line(&mut self, line_no: usize, raw: &str) -> Result<(), SpatialError> {
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        let err = |message: String| SpatialError::Parse { line: line_no, message };

        match line.as_str() {
            "NODE" => {
                if self.open {
                    return Err(err("NODE inside an open declaration".into()));
                }
                self.open = true;
            }
            "ENDNODE" => {
                if !self.open || self.current.is_none() {
                    return Err(err("ENDNODE without a declared node".into()));
                }
                self.open = false;
                self.current = None;
            }
            _ if line.starts_with(|c: char| c.is_ascii_digit()) => {
                if !self.open {
                    return Err(err(format!("coordinates {line:?} outside NODE ... ENDNODE")));
                }
                match self.current {
                    None => {
                        if line.contains(';') {
                            return Err(err(format!("expected a single coordinate, got {line:?}")));
                        }
                        let pos = parse_coord(&line).map_err(err)?;
                        self.current = Some(self.graph.add_node(pos));
                    }
                    Some(node) => {
                        for item in line.split(';') {
                            let pos = parse_coord(item).map_err(err)?;
                            let target = self.graph.add_node(pos);
                            self.graph.add_edge(node, target);
                        }
                    }
                }
            }
            _ => return Err(err(format!("unexpected token {line:?}"))),
        }
        Ok(())
    }

    fn finish(self, last_line: usize) -> Result<Graph, SpatialError> {
        if self.open {
            return Err(SpatialError::Parse {
                line: last_line,
                message: "missing ENDNODE at end of input".into(),
            });
        }
        Ok(self.graph)
    }
}

/// Parse `x,y` (non-negative integers, file units) into graph units.
fn parse_coord(s: &str) -> Result<Point, String> {
    let mut parts = s.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected x,y but got {s:?}"));
    };
    let num = |v: &str| {
        if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("non-numeric coordinate {v:?} in {s:?}"));
        }
        v.parse::<u64>()
            .map(|n| n as f64 / FILE_UNITS_PER_CM)
            .map_err(|e| format!("coordinate {v:?}: {e}"))
    };
    Ok(Point::new(num(x)?, num(y)?))
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Save a graph to a file, replacing it.
pub fn save_graph(graph: &Graph, path: &Path) -> Result<(), SpatialError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_graph(graph, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Serialize `graph` in arena order, out-edges in insertion order.
pub fn write_graph<W: Write>(graph: &Graph, mut out: W) -> Result<(), SpatialError> {
    for (_, node) in graph.iter() {
        writeln!(out, "NODE")?;
        writeln!(out, "    {}", format_coord(node.pos))?;
        let targets: Vec<String> = node
            .out_edges()
            .iter()
            .map(|&t| format_coord(graph.pos(t)))
            .collect();
        if !targets.is_empty() {
            writeln!(out, "    {}", targets.join(" ; "))?;
        }
        writeln!(out, "ENDNODE")?;
        writeln!(out)?;
    }
    Ok(())
}

fn format_coord(p: Point) -> String {
    format!("{},{}", to_file_units(p.x), to_file_units(p.y))
}

fn to_file_units(v: f64) -> i64 {
    (v * FILE_UNITS_PER_CM - ROUNDING_SLACK).ceil() as i64
}
