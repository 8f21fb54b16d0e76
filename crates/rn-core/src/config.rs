//! Planner tuning parameters.
//!
//! All distances are in graph units (centimetres).  The defaults are the
//! values the track was calibrated with.

use crate::{CoreError, CoreResult};

/// Search radii and limits used by the snapping, heading and alternative
/// route searches.
///
/// Typically built with `PlannerConfig::default()` and adjusted field by
/// field, or deserialized from a JSON/TOML file by the application crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Half-width of the box searched when a route endpoint does not lie
    /// exactly on a node.  Default: 20.
    pub snap_range: f64,

    /// Reach of the box searched ahead of the vehicle for its entry node.
    /// Default: 100.
    pub search_range: f64,

    /// Minimum axis offset for an edge to count as heading in a direction.
    /// The comparison is strict.  Default: 5.
    pub min_offset: f64,

    /// How many branch levels the alternative-route search expands.
    /// Default: 3.
    pub max_alt_depth: usize,

    /// Upper bound on the number of alternatives returned.  `None` keeps
    /// every distinct alternative found.
    pub max_alternatives: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            snap_range:       20.0,
            search_range:     100.0,
            min_offset:       5.0,
            max_alt_depth:    3,
            max_alternatives: None,
        }
    }
}

impl PlannerConfig {
    /// Reject negative or non-finite ranges.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [
            ("snap_range", self.snap_range),
            ("search_range", self.search_range),
            ("min_offset", self.min_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a finite, non-negative distance (got {value})"
                )));
            }
        }
        Ok(())
    }
}
