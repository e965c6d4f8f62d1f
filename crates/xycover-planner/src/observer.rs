//! Observer interface for in-progress runs
//!
//! The planner never draws anything itself. A renderer that wants to animate
//! a run implements [`CoverageObserver`] and is notified after every step.

use crate::summary::CoverageSummary;
use xycover_core::{Cell, SensorReading};

/// Listener trait for coverage run events
///
/// All methods default to no-ops so implementors only override what they draw.
pub trait CoverageObserver {
    /// Called after the tool was centered on `cell` and its footprint marked covered
    fn on_visit(&mut self, _cell: Cell) {}

    /// Called when a probe at `cell` found rockpoints; the cell is a dead end
    fn on_rejected(&mut self, _cell: Cell, _reading: SensorReading) {}

    /// Called with the interior cells travelled from `from` towards `to`
    fn on_reconnect(&mut self, _from: Cell, _to: Cell, _route: &[Cell]) {}

    /// Called once when the frontier is exhausted
    fn on_complete(&mut self, _summary: &CoverageSummary) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CoverageObserver for NullObserver {}

/// Coverage event types
#[derive(Debug, Clone, PartialEq)]
pub enum CoverageEvent {
    /// Tool visited a cell
    Visited(Cell),
    /// Probe rejected a cell
    Rejected { cell: Cell, reading: SensorReading },
    /// Tool travelled through visited cells to reach the next frontier cell
    Reconnected { from: Cell, to: Cell, steps: usize },
    /// Run finished
    Completed(CoverageSummary),
}

impl std::fmt::Display for CoverageEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageEvent::Visited(cell) => write!(f, "Visited {}", cell),
            CoverageEvent::Rejected { cell, reading } => {
                write!(f, "Rejected {} ({:?})", cell, reading)
            }
            CoverageEvent::Reconnected { from, to, steps } => {
                write!(f, "Reconnected {} -> {} in {} steps", from, to, steps)
            }
            CoverageEvent::Completed(summary) => write!(f, "Completed: {}", summary),
        }
    }
}

/// Observer that records every event in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<CoverageEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> impl Iterator<Item = Cell> + '_ {
        self.events.iter().filter_map(|e| match e {
            CoverageEvent::Visited(cell) => Some(*cell),
            _ => None,
        })
    }

    pub fn rejections(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CoverageEvent::Rejected { .. }))
            .count()
    }
}

impl CoverageObserver for RecordingObserver {
    fn on_visit(&mut self, cell: Cell) {
        self.events.push(CoverageEvent::Visited(cell));
    }

    fn on_rejected(&mut self, cell: Cell, reading: SensorReading) {
        self.events.push(CoverageEvent::Rejected { cell, reading });
    }

    fn on_reconnect(&mut self, from: Cell, to: Cell, route: &[Cell]) {
        self.events.push(CoverageEvent::Reconnected {
            from,
            to,
            steps: route.len(),
        });
    }

    fn on_complete(&mut self, summary: &CoverageSummary) {
        self.events.push(CoverageEvent::Completed(*summary));
    }
}
