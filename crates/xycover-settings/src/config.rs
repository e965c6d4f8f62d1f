//! Run configuration
//!
//! Sections map one-to-one onto the TOML tables of the config file:
//!
//! ```toml
//! [tool]
//! radius = 2
//!
//! [table]
//! size = 32
//! layout = "tables/workshop.txt"
//!
//! [planner]
//! strategy = "ida-star"
//!
//! [gcode]
//! cell_size_mm = 2.5
//! ```
//!
//! Every field has a default, so a partial file is valid.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use xycover_planner::{GcodeParameters, PlannerOptions, SearchStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Tool radius in cells
    pub radius: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self { radius: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Grid dimension used when no layout file is given
    pub size: usize,
    /// Text layout of the table; overrides `size`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<PathBuf>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            size: 32,
            layout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub strategy: SearchStrategy,
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tool: ToolSettings,
    pub table: TableSettings,
    pub planner: PlannerSettings,
    pub gcode: GcodeParameters,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/xycover/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("xycover").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.tool.radius == 0 {
            return Err(SettingsError::invalid("tool.radius", "must be > 0"));
        }

        // With a layout file the table size is only known after parsing
        if self.table.layout.is_none() {
            if self.table.size == 0 {
                return Err(SettingsError::invalid("table.size", "must be > 0"));
            }
            if 2 * self.tool.radius as usize >= self.table.size {
                return Err(SettingsError::invalid(
                    "tool.radius",
                    format!(
                        "tool of radius {} does not fit a {}x{} table",
                        self.tool.radius, self.table.size, self.table.size
                    ),
                ));
            }
        }

        let g = &self.gcode;
        if g.cell_size_mm <= 0.0 {
            return Err(SettingsError::invalid("gcode.cell_size_mm", "must be > 0"));
        }
        if g.feed_rate <= 0.0 {
            return Err(SettingsError::invalid("gcode.feed_rate", "must be > 0"));
        }
        if g.travel_feed_rate <= 0.0 {
            return Err(SettingsError::invalid("gcode.travel_feed_rate", "must be > 0"));
        }
        if g.spindle_speed < 0.0 {
            return Err(SettingsError::invalid("gcode.spindle_speed", "must be >= 0"));
        }

        Ok(())
    }

    pub fn planner_options(&self) -> PlannerOptions {
        PlannerOptions::new(self.tool.radius).with_strategy(self.planner.strategy)
    }
}
