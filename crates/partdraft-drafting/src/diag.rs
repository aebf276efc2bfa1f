//! Structured diagnostics for recoverable conditions.
//!
//! Degenerate geometry never aborts a drawing; each stage skips the
//! offending element and bumps a counter here so callers and tests can
//! assert on output quality.

use serde::{Deserialize, Serialize};

/// Counters for conditions recovered during drawing generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Degenerate triangles ignored during edge extraction.
    pub degenerate_triangles: usize,
    /// Edges with more than two adjacent faces (first two used).
    pub non_manifold_edges: usize,
    /// Projected edges discarded as degenerate or unclassifiable.
    pub skipped_edges: usize,
    /// Section chains that failed to close and were discarded.
    pub open_section_chains: usize,
    /// Section loops discarded for falling under the minimum area.
    pub discarded_loops: usize,
    /// Sections that fell back to the bounding-box approximation.
    pub degraded_sections: usize,
    /// Dimensions that exhausted the relocation budget.
    pub unresolved_dimensions: usize,
}

impl Diagnostics {
    /// Fold another stage's counters into this one.
    pub fn merge(&mut self, other: &Diagnostics) {
        self.degenerate_triangles += other.degenerate_triangles;
        self.non_manifold_edges += other.non_manifold_edges;
        self.skipped_edges += other.skipped_edges;
        self.open_section_chains += other.open_section_chains;
        self.discarded_loops += other.discarded_loops;
        self.degraded_sections += other.degraded_sections;
        self.unresolved_dimensions += other.unresolved_dimensions;
    }

    /// True when nothing was skipped or degraded.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}
