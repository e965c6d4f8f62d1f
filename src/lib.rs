//! # XYCover
//!
//! Plans one continuous coverage path for a circular tool moving on an
//! `N x N` XY table whose rockpoints are only discovered by probing.
//!
//! ## Architecture
//!
//! XYCover is organized as a workspace with multiple crates:
//!
//! 1. **xycover-core** - Cells, grids, tool footprint templates, obstacle sensor, errors
//! 2. **xycover-planner** - Frontier exploration, path reconnection, planner state machine, G-code export
//! 3. **xycover-settings** - JSON/TOML run configuration
//! 4. **xycover** - Command-line binary: layout loading, report rendering, logging

pub mod layout;
pub mod report;

pub use xycover_core::{
    Cell, CellGrid, CoverageError, DisplacementError, FnObstacleMap, ObstacleGrid, ObstacleMap,
    ObstacleSensor, Offset, SensorQuery, SensorReading, ToolFootprint,
};

pub use xycover_planner::{
    CoverageEvent, CoverageObserver, CoveragePath, CoveragePlanner, CoverageReport,
    CoverageSummary, GcodeParameters, PathGcodeExporter, PathReconnector, PathStep,
    PlannerOptions, PlannerState, RecordingObserver, SearchStrategy,
};

pub use xycover_settings::{Config, SettingsError};

use anyhow::Result;
use tracing::info;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG`
/// directives are honoured on top of `level`.
pub fn init_logging(level: tracing::Level) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}

/// Builds the obstacle grid described by `config`: the layout file when one
/// is set, otherwise an empty table of `table.size`.
pub fn load_table(config: &Config) -> Result<ObstacleGrid> {
    match &config.table.layout {
        Some(path) => layout::load_layout(path),
        None => Ok(ObstacleGrid::new(config.table.size)),
    }
}

/// Runs the planner to completion and returns its report.
pub fn plan<M: ObstacleMap>(
    map: M,
    options: PlannerOptions,
    observer: &mut dyn CoverageObserver,
) -> xycover_core::Result<CoverageReport> {
    let mut planner = CoveragePlanner::new(map, options)?;
    planner.run_with_observer(observer)?;
    let report = planner.report();
    info!(
        "Planned {} steps over a {}x{} table",
        report.path.len(),
        report.grid_size,
        report.grid_size
    );
    Ok(report)
}
