//! Square grids used by a coverage run.
//!
//! The obstacle grid is supplied by the caller and never mutated during a
//! run. The planner owns one [`CellGrid`] per boolean layer it tracks
//! (covered, visited, flood-seen).

use crate::cell::Cell;
use crate::error::{CoverageError, Result};
use serde::{Deserialize, Serialize};

/// Read-only obstacle predicate over a square grid.
///
/// Coordinates outside `0..size` must report an obstacle so that the table
/// boundary behaves like a wall.
pub trait ObstacleMap {
    /// Grid dimension `N` of the `N x N` table.
    fn size(&self) -> usize;

    /// Whether `cell` holds a rockpoint (or lies outside the table).
    fn is_obstacle(&self, cell: Cell) -> bool;

    /// Whether `cell` lies on the table.
    fn in_bounds(&self, cell: Cell) -> bool {
        in_square(cell, self.size())
    }
}

pub(crate) fn in_square(cell: Cell, size: usize) -> bool {
    cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < size && (cell.y as usize) < size
}

/// Fixed-size square grid of obstacle/free cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleGrid {
    size: usize,
    rocks: Vec<bool>,
}

impl ObstacleGrid {
    /// Creates an obstacle-free grid of dimension `size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            rocks: vec![false; size * size],
        }
    }

    /// Builds a grid from rows of obstacle flags, where `rows[y][x]` is the cell `(x, y)`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(CoverageError::InvalidGrid("grid has no rows".to_string()));
        }

        let mut grid = Self::new(size);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(CoverageError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    size
                )));
            }
            for (x, &rock) in row.iter().enumerate() {
                if rock {
                    grid.set_obstacle(Cell::new(x as i32, y as i32));
                }
            }
        }

        Ok(grid)
    }

    /// Returns the grid with an additional rockpoint at `cell`.
    ///
    /// Out-of-range cells are ignored.
    pub fn with_obstacle(mut self, cell: Cell) -> Self {
        self.set_obstacle(cell);
        self
    }

    /// Marks `cell` as a rockpoint. Out-of-range cells are ignored.
    pub fn set_obstacle(&mut self, cell: Cell) {
        if let Some(idx) = self.index(cell) {
            self.rocks[idx] = true;
        }
    }

    /// Number of rockpoints on the table.
    pub fn obstacle_count(&self) -> usize {
        self.rocks.iter().filter(|&&r| r).count()
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        in_square(cell, self.size).then(|| cell.y as usize * self.size + cell.x as usize)
    }
}

impl ObstacleMap for ObstacleGrid {
    fn size(&self) -> usize {
        self.size
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(idx) => self.rocks[idx],
            None => true,
        }
    }
}

/// Adapts a predicate closure to [`ObstacleMap`].
///
/// The closure is only consulted for in-range coordinates.
pub struct FnObstacleMap<F> {
    size: usize,
    predicate: F,
}

impl<F> FnObstacleMap<F>
where
    F: Fn(Cell) -> bool,
{
    pub fn new(size: usize, predicate: F) -> Self {
        Self { size, predicate }
    }
}

impl<F> ObstacleMap for FnObstacleMap<F>
where
    F: Fn(Cell) -> bool,
{
    fn size(&self) -> usize {
        self.size
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        !in_square(cell, self.size) || (self.predicate)(cell)
    }
}

impl<M: ObstacleMap + ?Sized> ObstacleMap for &M {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        (**self).is_obstacle(cell)
    }
}

/// Square boolean layer with the same dimensions as the obstacle grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGrid {
    size: usize,
    cells: Vec<bool>,
}

impl CellGrid {
    /// Creates an all-false grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `cell` lies on the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        in_square(cell, self.size)
    }

    /// Value at `cell`; out-of-range cells read as false.
    pub fn get(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|idx| self.cells[idx])
    }

    /// Sets the value at `cell`, returning false if `cell` is off the grid.
    pub fn set(&mut self, cell: Cell, value: bool) -> bool {
        match self.index(cell) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Set cells, ordered by x and then y, both ascending.
    pub fn cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(|(idx, _)| Cell::new((idx / self.size) as i32, (idx % self.size) as i32))
            .collect()
    }

    // Column-major storage keeps `cells()` in x-then-y order.
    fn index(&self, cell: Cell) -> Option<usize> {
        in_square(cell, self.size).then(|| cell.x as usize * self.size + cell.y as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_obstacle() {
        let grid = ObstacleGrid::new(4);
        assert!(!grid.is_obstacle(Cell::new(0, 0)));
        assert!(!grid.is_obstacle(Cell::new(3, 3)));
        assert!(grid.is_obstacle(Cell::new(-1, 0)));
        assert!(grid.is_obstacle(Cell::new(0, 4)));
        assert!(grid.is_obstacle(Cell::new(4, 2)));
    }

    #[test]
    fn test_from_rows_orientation() {
        let rows = vec![
            vec![false, true, false],
            vec![false, false, false],
            vec![false, false, true],
        ];
        let grid = ObstacleGrid::from_rows(&rows).unwrap();
        assert_eq!(grid.size(), 3);
        assert!(grid.is_obstacle(Cell::new(1, 0)));
        assert!(grid.is_obstacle(Cell::new(2, 2)));
        assert!(!grid.is_obstacle(Cell::new(0, 1)));
        assert_eq!(grid.obstacle_count(), 2);
    }

    #[test]
    fn test_from_rows_rejects_non_square() {
        let rows = vec![vec![false, false], vec![false]];
        assert!(matches!(
            ObstacleGrid::from_rows(&rows),
            Err(CoverageError::InvalidGrid(_))
        ));
        assert!(ObstacleGrid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_fn_obstacle_map() {
        let map = FnObstacleMap::new(5, |c: Cell| c.x == 2);
        assert!(map.is_obstacle(Cell::new(2, 0)));
        assert!(!map.is_obstacle(Cell::new(1, 0)));
        assert!(map.is_obstacle(Cell::new(5, 0)));
        assert!(map.in_bounds(Cell::new(4, 4)));
    }

    #[test]
    fn test_cell_grid_ordering() {
        let mut grid = CellGrid::new(3);
        assert!(grid.set(Cell::new(2, 0), true));
        assert!(grid.set(Cell::new(0, 2), true));
        assert!(grid.set(Cell::new(0, 1), true));
        assert!(!grid.set(Cell::new(3, 0), true));

        assert_eq!(
            grid.cells(),
            vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(2, 0)]
        );
        assert_eq!(grid.count(), 3);
        assert!(!grid.get(Cell::new(-1, 1)));
    }

    #[test]
    fn test_cell_grid_json_keeps_column_major_layout() {
        let mut grid = CellGrid::new(3);
        grid.set(Cell::new(2, 0), true);
        grid.set(Cell::new(0, 1), true);

        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value["size"], 3);
        let flags: Vec<bool> = serde_json::from_value(value["cells"].clone()).unwrap();
        // (x, y) is stored at x * size + y
        assert_eq!(
            flags,
            vec![false, true, false, false, false, false, true, false, false]
        );

        let back: CellGrid = serde_json::from_value(value).unwrap();
        assert_eq!(back, grid);
        assert_eq!(back.cells(), vec![Cell::new(0, 1), Cell::new(2, 0)]);
    }

    #[test]
    fn test_obstacle_grid_json() {
        let grid = ObstacleGrid::new(4)
            .with_obstacle(Cell::new(1, 3))
            .with_obstacle(Cell::new(2, 0));
        let json = serde_json::to_string(&grid).unwrap();
        let back: ObstacleGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert!(back.is_obstacle(Cell::new(1, 3)));
        assert_eq!(back.obstacle_count(), 2);
    }
}
