//! XYCover Settings Crate
//!
//! Loads, validates and saves the run configuration (tool, table, planner
//! and G-code sections) as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, PlannerSettings, TableSettings, ToolSettings};
pub use error::{SettingsError, SettingsResult};
