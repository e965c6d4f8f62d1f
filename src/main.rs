use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, Level};
use xycover::{
    init_logging, load_table, plan, report, Config, CoverageEvent, CoveragePath,
    PathGcodeExporter, RecordingObserver, SearchStrategy,
};

/// Plan a coverage path for a circular tool on an XY table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Table layout file ('#'/'X' rockpoint, '.'/' ' free)
    #[arg(short, long, conflicts_with = "size")]
    layout: Option<PathBuf>,

    /// Size of an obstacle-free table when no layout is given
    #[arg(short, long)]
    size: Option<usize>,

    /// Tool radius in cells
    #[arg(short, long)]
    radius: Option<u32>,

    /// Reconnection search (astar or ida-star)
    #[arg(long)]
    strategy: Option<SearchStrategy>,

    /// Configuration file (.toml or .json); defaults to the user config if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print an ASCII map of the covered table
    #[arg(short, long)]
    map: bool,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the coverage path as G-code
    #[arg(long)]
    gcode: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) if path.exists() => Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            _ => Config::default(),
        },
    };

    if let Some(layout) = &args.layout {
        config.table.layout = Some(layout.clone());
    }
    if let Some(size) = args.size {
        config.table.size = size;
        config.table.layout = None;
    }
    if let Some(radius) = args.radius {
        config.tool.radius = radius;
    }
    if let Some(strategy) = args.strategy {
        config.planner.strategy = strategy;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    init_logging(level)?;

    let config = load_config(&args)?;
    let grid = load_table(&config)?;

    let mut observer = RecordingObserver::new();
    let report = plan(&grid, config.planner_options(), &mut observer)?;
    for event in observer
        .events
        .iter()
        .filter(|e| matches!(e, CoverageEvent::Reconnected { .. }))
    {
        debug!("{}", event);
    }

    print!("{}", report::render_summary(&report));
    if args.map {
        println!();
        print!("{}", report::render_map(&grid, &report));
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    if let Some(path) = &args.gcode {
        let coverage_path = CoveragePath::from_steps(report.path.clone());
        let gcode = PathGcodeExporter::new(config.gcode.clone()).generate(&coverage_path)?;
        std::fs::write(path, gcode)
            .with_context(|| format!("Failed to write G-code {}", path.display()))?;
    }

    Ok(())
}
