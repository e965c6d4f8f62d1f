//! Frontier exploration.
//!
//! Candidate tool centers are kept on a LIFO stack, so exploration is
//! depth-first. A cell is marked flood-seen when it is popped; later copies
//! of the same cell still on the stack are skipped. Only cells whose probe
//! came back clear get their neighbours pushed, which prunes dead ends at
//! rockpoints.

use crate::path::CoveragePath;
use tracing::trace;
use xycover_core::{
    Cell, CellGrid, CoverageError, ObstacleMap, ObstacleSensor, Result, SensorQuery,
    SensorReading,
};

/// Covered and visited layers of a run.
#[derive(Debug, Clone)]
pub struct CoverageLayers {
    pub covered: CellGrid,
    pub visited: CellGrid,
    /// Set once the first full footprint has been applied; every later
    /// visit only marks the footprint's shell.
    pub full_footprint_applied: bool,
}

impl CoverageLayers {
    pub fn new(size: usize) -> Self {
        Self {
            covered: CellGrid::new(size),
            visited: CellGrid::new(size),
            full_footprint_applied: false,
        }
    }
}

/// Result of a visit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    Visited,
    /// The probe found rockpoints; the cell is a dead end.
    Rejected(SensorReading),
}

/// Depth-first frontier over candidate tool centers.
#[derive(Debug, Clone)]
pub struct FrontierExplorer {
    size: usize,
    radius: u32,
    stack: Vec<Cell>,
    flood_seen: CellGrid,
}

impl FrontierExplorer {
    /// Creates an explorer seeded with the interior start cell `(radius + 1, radius + 1)`.
    pub fn new(size: usize, radius: u32) -> Self {
        Self {
            size,
            radius,
            stack: vec![Self::seed(radius)],
            flood_seen: CellGrid::new(size),
        }
    }

    pub fn seed(radius: u32) -> Cell {
        let s = radius as i32 + 1;
        Cell::new(s, s)
    }

    /// Number of entries still on the stack, duplicates included.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    pub fn is_flood_seen(&self, cell: Cell) -> bool {
        self.flood_seen.get(cell)
    }

    /// Whether the whole tool footprint centered at `cell` lies on the table.
    pub fn is_ball_contained(&self, cell: Cell) -> bool {
        let lo = self.radius as i64 - 1;
        let hi = self.size as i64 - self.radius as i64;
        let (x, y) = (i64::from(cell.x), i64::from(cell.y));
        x >= lo && x <= hi && y >= lo && y <= hi
    }

    /// Pops the next candidate not yet flood-seen and marks it seen.
    pub fn next_candidate(&mut self) -> Option<Cell> {
        while let Some(cell) = self.stack.pop() {
            if self.flood_seen.get(cell) {
                continue;
            }
            self.flood_seen.set(cell, true);
            return Some(cell);
        }
        None
    }

    /// Pushes the in-bounds, unseen, contained neighbours of a visited cell.
    pub fn expand(&mut self, cell: Cell) {
        for neighbor in cell.neighbors_4() {
            if !self.flood_seen.contains(neighbor) || self.flood_seen.get(neighbor) {
                continue;
            }
            if self.is_ball_contained(neighbor) {
                self.stack.push(neighbor);
            }
        }
    }

    /// Probes `cell` and, when clear, records the visit and marks coverage.
    ///
    /// The first successful visit of a run marks the full footprint; later
    /// visits only mark the shell. A footprint leaving the table means the
    /// containment gate was bypassed and aborts the run.
    pub fn visit_point<M: ObstacleMap + ?Sized>(
        &self,
        cell: Cell,
        map: &M,
        sensor: &ObstacleSensor,
        layers: &mut CoverageLayers,
        path: &mut CoveragePath,
    ) -> Result<VisitOutcome> {
        let reading = sensor.probe(SensorQuery::new(cell, map));
        if !reading.is_clear() {
            trace!("Dead end at {}: {:?}", cell, reading);
            return Ok(VisitOutcome::Rejected(reading));
        }

        let footprint = sensor.footprint();
        let marked: Vec<Cell> = if layers.full_footprint_applied {
            footprint.shell(cell).collect()
        } else {
            footprint.coverage(cell).collect()
        };

        if let Some(&outside) = marked.iter().find(|&&c| !layers.covered.contains(c)) {
            return Err(CoverageError::FootprintOutOfBounds {
                center: cell,
                cell: outside,
            });
        }

        layers.visited.set(cell, true);
        path.push_exploratory(cell);
        layers.full_footprint_applied = true;
        for c in marked {
            layers.covered.set(c, true);
        }

        Ok(VisitOutcome::Visited)
    }
}
