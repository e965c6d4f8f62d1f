//! Run summary and serialisable report.

use crate::path::PathStep;
use serde::{Deserialize, Serialize};
use xycover_core::Cell;

/// Efficiency figures of a coverage run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Number of cells the tool was centered on with a clear footprint.
    pub visited_cells: usize,
    /// Number of cells marked covered by some footprint.
    pub covered_cells: usize,
    /// Steps travelled: one per visit plus every reconnection cell.
    pub total_distance: usize,
    /// Steps spent only on reconnection.
    pub reconnection_steps: usize,
    /// `100 * visited / total_distance`, rounded to one decimal place.
    pub efficiency_percent: f64,
}

impl CoverageSummary {
    pub fn new(
        visited_cells: usize,
        covered_cells: usize,
        total_distance: usize,
        reconnection_steps: usize,
    ) -> Self {
        Self {
            visited_cells,
            covered_cells,
            total_distance,
            reconnection_steps,
            efficiency_percent: efficiency_percent(visited_cells, total_distance),
        }
    }
}

impl std::fmt::Display for CoverageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total distance is {} which has {:.1}% efficiency ({} visited, {} covered, {} reconnection steps)",
            self.total_distance,
            self.efficiency_percent,
            self.visited_cells,
            self.covered_cells,
            self.reconnection_steps
        )
    }
}

/// A run that never moved reports 0% rather than dividing by zero.
fn efficiency_percent(visited: usize, total_distance: usize) -> f64 {
    if total_distance == 0 {
        return 0.0;
    }
    let raw = 100.0 * visited as f64 / total_distance as f64;
    (raw * 10.0).round() / 10.0
}

/// Everything an external renderer needs from a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub grid_size: usize,
    pub radius: u32,
    pub summary: CoverageSummary,
    pub path: Vec<PathStep>,
    pub visited: Vec<Cell>,
    pub covered: Vec<Cell>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficiency_rounding() {
        assert_eq!(CoverageSummary::new(25, 25, 25, 0).efficiency_percent, 100.0);
        assert_eq!(CoverageSummary::new(25, 25, 27, 2).efficiency_percent, 92.6);
        assert_eq!(CoverageSummary::new(1, 1, 3, 2).efficiency_percent, 33.3);
    }

    #[test]
    fn test_zero_distance() {
        let summary = CoverageSummary::new(0, 0, 0, 0);
        assert_eq!(summary.efficiency_percent, 0.0);
    }

    #[test]
    fn test_display() {
        let summary = CoverageSummary::new(21, 21, 27, 6);
        assert_eq!(
            summary.to_string(),
            "Total distance is 27 which has 77.8% efficiency (21 visited, 21 covered, 6 reconnection steps)"
        );
    }
}
