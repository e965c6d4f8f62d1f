//! Plain-text rendering of a finished run.

use xycover_core::{Cell, CellGrid, ObstacleMap};
use xycover_planner::CoverageReport;

/// Renders the table one row per line, row `y = 0` first.
///
/// `#` rockpoint, `o` visited tool center, `+` covered, `.` uncovered.
pub fn render_map<M: ObstacleMap + ?Sized>(map: &M, report: &CoverageReport) -> String {
    let size = report.grid_size;
    let mut visited = CellGrid::new(size);
    let mut covered = CellGrid::new(size);
    for &cell in &report.visited {
        visited.set(cell, true);
    }
    for &cell in &report.covered {
        covered.set(cell, true);
    }

    let mut out = String::with_capacity(size * (size + 1));
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let cell = Cell::new(x, y);
            let c = if map.is_obstacle(cell) {
                '#'
            } else if visited.get(cell) {
                'o'
            } else if covered.get(cell) {
                '+'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

pub fn render_summary(report: &CoverageReport) -> String {
    let mut out = String::new();
    let cells = report.grid_size * report.grid_size;
    out.push_str(&format!(
        "Table {}x{}, tool radius {}\n",
        report.grid_size, report.grid_size, report.radius
    ));
    out.push_str(&format!(
        "Covered {} of {} cells ({:.1}%)\n",
        report.summary.covered_cells,
        cells,
        100.0 * report.summary.covered_cells as f64 / cells.max(1) as f64
    ));
    out.push_str(&format!("{}\n", report.summary));
    out
}
