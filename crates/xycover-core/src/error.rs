//! Error handling for XYCover
//!
//! Provides the error types shared by the planner layers:
//! - Displacement errors (recoverable, raised by the obstacle sensor)
//! - Coverage errors (configuration problems and fatal planner invariants)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::cell::Cell;
use thiserror::Error;

/// The sensor could not find any admissible tool placement near a probed center.
///
/// This is an expected outcome while exploring and is recovered by the
/// frontier explorer, which treats the probed cell as a dead end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No admissible placement near center {center}")]
pub struct DisplacementError {
    /// The probed tool center.
    pub center: Cell,
}

/// Coverage error type
///
/// Represents configuration problems detected before a run starts and the
/// fatal invariant violations that abort a run in progress.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    /// Tool radius and grid size leave no coverable interior cell
    #[error("Invalid configuration: radius {radius} on a {size}x{size} grid (requires radius >= 1 and 2 * radius < size)")]
    InvalidConfiguration {
        /// The requested tool radius.
        radius: u32,
        /// The grid dimension.
        size: usize,
    },

    /// The obstacle grid could not be constructed
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A footprint application would write outside the grid
    #[error("Footprint of tool centered at {center} leaves the grid at {cell}")]
    FootprintOutOfBounds {
        /// The tool center being visited.
        center: Cell,
        /// The first footprint cell found outside the grid.
        cell: Cell,
    },

    /// No route through safe cells connects the tool to the next frontier cell
    #[error("Cannot reconnect from {from} to {to} through {} safe cells", safe_cells.len())]
    Unreachable {
        /// The frontier cell the search started from.
        from: Cell,
        /// The current tool location the search was looking for.
        to: Cell,
        /// The visited cells available to the search.
        safe_cells: Vec<Cell>,
    },

    /// An obstacle layout could not be parsed
    #[error("Layout error at line {line}: {reason}")]
    Layout {
        /// The 1-based line number.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },
}

impl CoverageError {
    /// Whether the error aborts a run that has already started.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::FootprintOutOfBounds { .. } | Self::Unreachable { .. }
        )
    }
}

/// Result type alias for coverage operations.
pub type Result<T> = std::result::Result<T, CoverageError>;
