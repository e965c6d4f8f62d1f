//! Coverage planner.
//!
//! Orchestrates one coverage run: the frontier explorer picks the next
//! candidate, the path reconnector stitches the tool's current position to
//! it when they are not adjacent, and the sensor decides whether the
//! candidate can be visited. The planner owns every output of the run.

use crate::frontier::{CoverageLayers, FrontierExplorer, VisitOutcome};
use crate::observer::{CoverageObserver, NullObserver};
use crate::path::CoveragePath;
use crate::reconnect::{PathReconnector, ReconnectQuery, SearchStrategy};
use crate::summary::{CoverageReport, CoverageSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use xycover_core::{
    Cell, CoverageError, ObstacleMap, ObstacleSensor, Result, ToolFootprint,
};

/// Options of a coverage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerOptions {
    /// Tool radius in cells
    pub radius: u32,
    /// Search used to reconnect the tool to the next frontier cell
    pub strategy: SearchStrategy,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            radius: 2,
            strategy: SearchStrategy::AStar,
        }
    }
}

impl PlannerOptions {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks that some interior cell of an `size x size` table is coverable.
    pub fn validate(&self, size: usize) -> Result<()> {
        if self.radius == 0 || 2 * self.radius as usize >= size {
            return Err(CoverageError::InvalidConfiguration {
                radius: self.radius,
                size,
            });
        }
        Ok(())
    }
}

/// Run state of the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    Init,
    Exploring,
    Done,
    /// A fatal invariant violation stopped the run; outputs are partial.
    Aborted,
}

impl PlannerState {
    /// Returns the name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            PlannerState::Init => "Init",
            PlannerState::Exploring => "Exploring",
            PlannerState::Done => "Done",
            PlannerState::Aborted => "Aborted",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, PlannerState::Done | PlannerState::Aborted)
    }
}

/// Single-run coverage planner over an obstacle map.
pub struct CoveragePlanner<M: ObstacleMap> {
    map: M,
    options: PlannerOptions,
    sensor: ObstacleSensor,
    explorer: FrontierExplorer,
    reconnector: PathReconnector,
    layers: CoverageLayers,
    path: CoveragePath,
    total_distance: usize,
    state: PlannerState,
}

impl<M: ObstacleMap> CoveragePlanner<M> {
    /// Creates a planner, rejecting radius/grid combinations with no coverable cell.
    pub fn new(map: M, options: PlannerOptions) -> Result<Self> {
        let size = map.size();
        if let Err(e) = options.validate(size) {
            warn!("Rejecting coverage run: {}", e);
            return Err(e);
        }

        Ok(Self {
            sensor: ObstacleSensor::new(ToolFootprint::new(options.radius)),
            explorer: FrontierExplorer::new(size, options.radius),
            reconnector: PathReconnector::new(options.strategy),
            layers: CoverageLayers::new(size),
            path: CoveragePath::new(),
            total_distance: 0,
            state: PlannerState::Init,
            map,
            options,
        })
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn sensor(&self) -> &ObstacleSensor {
        &self.sensor
    }

    /// Runs to completion.
    pub fn run(&mut self) -> Result<CoverageSummary> {
        self.run_with_observer(&mut NullObserver)
    }

    /// Runs to completion, notifying `observer` after every step.
    pub fn run_with_observer(
        &mut self,
        observer: &mut dyn CoverageObserver,
    ) -> Result<CoverageSummary> {
        while !self.step_with_observer(observer)?.is_finished() {}
        Ok(self.summary())
    }

    /// Performs one pop of the frontier.
    pub fn step(&mut self) -> Result<PlannerState> {
        self.step_with_observer(&mut NullObserver)
    }

    /// Performs one pop of the frontier: reconnect if needed, visit, expand.
    pub fn step_with_observer(
        &mut self,
        observer: &mut dyn CoverageObserver,
    ) -> Result<PlannerState> {
        match self.state {
            PlannerState::Done | PlannerState::Aborted => return Ok(self.state),
            PlannerState::Init => {
                info!(
                    "Starting coverage of {}x{} table with radius {} ({} reconnection)",
                    self.map.size(),
                    self.map.size(),
                    self.options.radius,
                    self.options.strategy
                );
                self.state = PlannerState::Exploring;
            }
            PlannerState::Exploring => {}
        }

        let Some(next) = self.explorer.next_candidate() else {
            self.state = PlannerState::Done;
            let summary = self.summary();
            info!("{}", summary);
            observer.on_complete(&summary);
            return Ok(self.state);
        };

        if let Err(e) = self.advance(next, observer) {
            self.state = PlannerState::Aborted;
            return Err(e);
        }
        Ok(self.state)
    }

    fn advance(&mut self, next: Cell, observer: &mut dyn CoverageObserver) -> Result<()> {
        if let Some(current) = self.path.last_cell() {
            if !current.is_adjacent(next) {
                self.reconnect(current, next, observer)?;
            }
        }

        match self.explorer.visit_point(
            next,
            &self.map,
            &self.sensor,
            &mut self.layers,
            &mut self.path,
        )? {
            VisitOutcome::Visited => {
                self.total_distance += 1;
                self.explorer.expand(next);
                observer.on_visit(next);
            }
            VisitOutcome::Rejected(reading) => observer.on_rejected(next, reading),
        }
        Ok(())
    }

    fn reconnect(
        &mut self,
        current: Cell,
        next: Cell,
        observer: &mut dyn CoverageObserver,
    ) -> Result<()> {
        let query = ReconnectQuery::new(next, current, &self.layers.visited);
        let route = match self.reconnector.reconnect(&query) {
            Ok(route) => route,
            Err(e) => {
                warn!("Aborting coverage run: {}", e);
                return Err(e);
            }
        };

        // The search runs from the frontier cell back to the tool; travel goes the other way
        let travel: Vec<Cell> = route.interior().iter().rev().copied().collect();
        debug!(
            "Reconnecting {} -> {} through {} cells ({} expansions)",
            current,
            next,
            travel.len(),
            route.nodes_expanded
        );

        self.total_distance += travel.len();
        self.path.extend_reconnection(travel.iter().copied());
        observer.on_reconnect(current, next, &travel);
        Ok(())
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.layers.visited.get(cell)
    }

    pub fn is_covered(&self, cell: Cell) -> bool {
        self.layers.covered.get(cell)
    }

    /// Visited cells, ordered by x and then y.
    pub fn visited_cells(&self) -> Vec<Cell> {
        self.layers.visited.cells()
    }

    /// Covered cells, ordered by x and then y.
    pub fn covered_cells(&self) -> Vec<Cell> {
        self.layers.covered.cells()
    }

    pub fn path(&self) -> &CoveragePath {
        &self.path
    }

    pub fn total_distance(&self) -> usize {
        self.total_distance
    }

    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary::new(
            self.layers.visited.count(),
            self.layers.covered.count(),
            self.total_distance,
            self.path.reconnection_count(),
        )
    }

    /// Snapshot of the run's outputs for external renderers.
    pub fn report(&self) -> CoverageReport {
        CoverageReport {
            grid_size: self.map.size(),
            radius: self.options.radius,
            summary: self.summary(),
            path: self.path.steps().to_vec(),
            visited: self.visited_cells(),
            covered: self.covered_cells(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{CoverageEvent, RecordingObserver};
    use xycover_core::ObstacleGrid;

    #[test]
    fn test_rejects_oversized_radius() {
        let grid = ObstacleGrid::new(6);
        assert!(matches!(
            CoveragePlanner::new(&grid, PlannerOptions::new(3)),
            Err(CoverageError::InvalidConfiguration { radius: 3, size: 6 })
        ));
        assert!(CoveragePlanner::new(&grid, PlannerOptions::new(0)).is_err());
        assert!(CoveragePlanner::new(&grid, PlannerOptions::new(2)).is_ok());
    }

    #[test]
    fn test_state_machine() {
        let grid = ObstacleGrid::new(5);
        let mut planner = CoveragePlanner::new(&grid, PlannerOptions::new(1)).unwrap();
        assert_eq!(planner.state(), PlannerState::Init);

        assert_eq!(planner.step().unwrap(), PlannerState::Exploring);
        assert!(planner.is_visited(Cell::new(2, 2)));
        assert_eq!(planner.path().len(), 1);

        let mut steps = 1;
        while planner.step().unwrap() != PlannerState::Done {
            steps += 1;
        }
        // One pop per cell, one final pop finding the stack empty
        assert_eq!(steps, 25);
        assert_eq!(planner.step().unwrap(), PlannerState::Done);
    }

    #[test]
    fn test_observer_sees_every_visit() {
        let grid = ObstacleGrid::new(6);
        let mut planner = CoveragePlanner::new(&grid, PlannerOptions::new(1)).unwrap();
        let mut observer = RecordingObserver::new();
        let summary = planner.run_with_observer(&mut observer).unwrap();

        assert_eq!(observer.visits().count(), summary.visited_cells);
        assert!(matches!(
            observer.events.last(),
            Some(CoverageEvent::Completed(s)) if *s == summary
        ));
    }

    #[test]
    fn test_report_matches_accessors() {
        let grid = ObstacleGrid::new(8).with_obstacle(Cell::new(5, 5));
        let mut planner = CoveragePlanner::new(&grid, PlannerOptions::new(2)).unwrap();
        planner.run().unwrap();

        let report = planner.report();
        assert_eq!(report.grid_size, 8);
        assert_eq!(report.visited, planner.visited_cells());
        assert_eq!(report.covered, planner.covered_cells());
        assert_eq!(report.path.len(), planner.path().len());
        assert_eq!(report.summary.total_distance, planner.total_distance());
    }
}
