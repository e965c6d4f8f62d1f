//! G-code export of a coverage path.
//!
//! Cells are mapped to machine coordinates at their centers. The tool
//! plunges once at the first step and stays down for the whole path, since
//! reconnection steps only cross cells that were already visited. Runs of
//! collinear steps with the same kind collapse into a single `G1` move.

use crate::path::{CoveragePath, PathStep};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use xycover_core::Cell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeParameters {
    /// Edge length of one grid cell in mm
    pub cell_size_mm: f64,
    /// Feed rate for exploratory (cutting) moves in mm/min
    pub feed_rate: f64,
    /// Feed rate for reconnection moves in mm/min
    pub travel_feed_rate: f64,
    pub spindle_speed: f64,
    pub cut_depth: f64,
    pub safe_z: f64,
}

impl Default for GcodeParameters {
    fn default() -> Self {
        Self {
            cell_size_mm: 1.0,
            feed_rate: 800.0,
            travel_feed_rate: 1500.0,
            spindle_speed: 12000.0,
            cut_depth: 0.5,
            safe_z: 5.0,
        }
    }
}

pub struct PathGcodeExporter {
    params: GcodeParameters,
}

impl PathGcodeExporter {
    pub fn new(params: GcodeParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GcodeParameters {
        &self.params
    }

    fn position(&self, cell: Cell) -> (f64, f64) {
        let s = self.params.cell_size_mm;
        ((f64::from(cell.x) + 0.5) * s, (f64::from(cell.y) + 0.5) * s)
    }

    pub fn generate(&self, path: &CoveragePath) -> Result<String> {
        let p = &self.params;
        if p.cell_size_mm <= 0.0 {
            bail!("Cell size must be positive, got {}", p.cell_size_mm);
        }
        let Some(first) = path.steps().first() else {
            bail!("Cannot export an empty coverage path");
        };

        let mut gcode = String::new();

        // Header
        gcode.push_str("; Coverage Toolpath\n");
        gcode.push_str(&format!(
            "; Steps: {} ({} exploratory, {} reconnection)\n",
            path.len(),
            path.exploratory_count(),
            path.reconnection_count()
        ));
        gcode.push_str(&format!("; Cell Size: {:.3} mm\n", p.cell_size_mm));
        gcode.push_str(&format!("; Cut Depth: {:.1} mm\n", p.cut_depth));

        gcode.push_str("G21 ; Set units to millimeters\n");
        gcode.push_str("G90 ; Absolute positioning\n");
        gcode.push_str("G17 ; XY plane selection\n\n");
        gcode.push_str(&format!("G0 Z{:.3} ; Move to safe height\n", p.safe_z));
        gcode.push_str(&format!("M3 S{:.0}\n", p.spindle_speed));

        let (x, y) = self.position(first.cell);
        gcode.push_str(&format!("G0 X{:.3} Y{:.3}\n", x, y));
        let target_z = -p.cut_depth.abs();
        gcode.push_str(&format!("G1 Z{:.3} F{:.1}\n", target_z, p.feed_rate / 2.0));

        for segment in segments(path.steps()) {
            let (x, y) = self.position(segment.end);
            let feed = if segment.exploratory {
                p.feed_rate
            } else {
                p.travel_feed_rate
            };
            gcode.push_str(&format!("G1 X{:.3} Y{:.3} F{:.1}\n", x, y, feed));
        }

        gcode.push_str(&format!("G0 Z{:.3}\n", p.safe_z));
        gcode.push_str("M5\n");
        gcode.push_str("M30\n");

        Ok(gcode)
    }
}

struct Segment {
    end: Cell,
    exploratory: bool,
}

/// Collapses consecutive steps moving in the same direction with the same kind.
fn segments(steps: &[PathStep]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut last_dir = None;

    for w in steps.windows(2) {
        let dir = w[1].cell - w[0].cell;
        let kind = w[1].exploratory;
        match out.last_mut() {
            Some(seg) if last_dir == Some(dir) && seg.exploratory == kind => seg.end = w[1].cell,
            _ => out.push(Segment {
                end: w[1].cell,
                exploratory: kind,
            }),
        }
        last_dir = Some(dir);
    }
    out
}
