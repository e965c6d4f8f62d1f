//! # XYCover Planner
//!
//! Plans a single continuous coverage path for a circular tool over a table
//! whose rockpoints are discovered by probing.
//!
//! ## Components
//!
//! - **Frontier Explorer**: depth-first stack of candidate tool centers
//! - **Path Reconnector**: shortest route through visited cells (A* or IDA*)
//! - **Coverage Planner**: `Init -> Exploring -> Done | Aborted` state machine owning the run's output
//! - **Observer**: hooks for live rendering of an in-progress run
//! - **G-Code Export**: converts a finished coverage path into XY table moves

pub mod frontier;
pub mod gcode;
pub mod observer;
pub mod path;
pub mod planner;
pub mod reconnect;
pub mod summary;

pub use frontier::{CoverageLayers, FrontierExplorer, VisitOutcome};
pub use gcode::{GcodeParameters, PathGcodeExporter};
pub use observer::{CoverageEvent, CoverageObserver, NullObserver, RecordingObserver};
pub use path::{CoveragePath, PathStep};
pub use planner::{CoveragePlanner, PlannerOptions, PlannerState};
pub use reconnect::{PathReconnector, ReconnectQuery, Route, SearchStrategy};
pub use summary::{CoverageReport, CoverageSummary};
