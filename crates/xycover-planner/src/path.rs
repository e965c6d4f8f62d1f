//! The tool path produced by a coverage run.

use serde::{Deserialize, Serialize};
use xycover_core::Cell;

/// One cell of the tool path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub cell: Cell,
    /// True for genuine coverage steps reached by the frontier; false for
    /// cells only traversed to reconnect the tool to the next frontier cell.
    pub exploratory: bool,
}

impl PathStep {
    pub fn exploratory(cell: Cell) -> Self {
        Self {
            cell,
            exploratory: true,
        }
    }

    pub fn reconnection(cell: Cell) -> Self {
        Self {
            cell,
            exploratory: false,
        }
    }
}

/// Append-only sequence of tool positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePath {
    steps: Vec<PathStep>,
}

impl CoveragePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a path from recorded steps, e.g. a deserialised report.
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub(crate) fn push_exploratory(&mut self, cell: Cell) {
        self.steps.push(PathStep::exploratory(cell));
    }

    pub(crate) fn extend_reconnection(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.steps
            .extend(cells.into_iter().map(PathStep::reconnection));
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Cell the tool currently sits on.
    pub fn last_cell(&self) -> Option<Cell> {
        self.steps.last().map(|s| s.cell)
    }

    pub fn exploratory_count(&self) -> usize {
        self.steps.iter().filter(|s| s.exploratory).count()
    }

    pub fn reconnection_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.exploratory).count()
    }

    /// Whether every consecutive pair of steps is 4-adjacent.
    pub fn is_continuous(&self) -> bool {
        self.steps
            .windows(2)
            .all(|w| w[0].cell.is_adjacent(w[1].cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_last_cell() {
        let mut path = CoveragePath::new();
        assert!(path.is_empty());
        assert_eq!(path.last_cell(), None);

        path.push_exploratory(Cell::new(1, 1));
        path.extend_reconnection([Cell::new(1, 2), Cell::new(1, 3)]);
        path.push_exploratory(Cell::new(2, 3));

        assert_eq!(path.len(), 4);
        assert_eq!(path.exploratory_count(), 2);
        assert_eq!(path.reconnection_count(), 2);
        assert_eq!(path.last_cell(), Some(Cell::new(2, 3)));
        assert!(path.is_continuous());
    }

    #[test]
    fn test_discontinuity_detected() {
        let mut path = CoveragePath::new();
        path.push_exploratory(Cell::new(0, 0));
        path.push_exploratory(Cell::new(2, 0));
        assert!(!path.is_continuous());
    }
}
