//! # XYCover Core
//!
//! Core types for planning coverage of an XY table whose obstacles are only
//! discovered by probing.
//!
//! - **Cells and offsets**: integer grid coordinates and relative vectors
//! - **Grids**: the immutable obstacle grid and the boolean grids a run fills in
//! - **Tool footprint**: coverage and shell templates of a circular tool
//! - **Obstacle sensor**: displacement queries against an obstacle predicate
//! - **Errors**: recoverable sensor failures and fatal planner conditions

pub mod cell;
pub mod error;
pub mod footprint;
pub mod grid;
pub mod sensor;

pub use cell::{Cell, Offset};
pub use error::{CoverageError, DisplacementError, Result};
pub use footprint::{build_coverage_template, build_shell_template, ToolFootprint};
pub use grid::{CellGrid, FnObstacleMap, ObstacleGrid, ObstacleMap};
pub use sensor::{ObstacleSensor, SensorQuery, SensorReading};
