use std::path::PathBuf;
use tempfile::TempDir;
use xycover::{
    load_table, plan, report, Cell, Config, CoveragePath, CoverageReport,
    ObstacleMap, PathGcodeExporter, RecordingObserver, SearchStrategy,
};

const WALL_LAYOUT: &str = "\
; 7x7 table split by a wall at x = 3
...#...
...#...
...#...
...#...
...#...
...#...
...#...
";

fn write_layout(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("wall.txt");
    std::fs::write(&path, WALL_LAYOUT).unwrap();
    path
}

#[test]
fn test_layout_file_to_report() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::new();
    config.tool.radius = 1;
    config.table.layout = Some(write_layout(&dir));

    let grid = load_table(&config).unwrap();
    assert_eq!(grid.size(), 7);
    assert!(grid.is_obstacle(Cell::new(3, 5)));

    let mut observer = RecordingObserver::new();
    let report = plan(&grid, config.planner_options(), &mut observer).unwrap();
    assert_eq!(report.summary.visited_cells, 21);
    assert_eq!(report.summary.total_distance, 27);
    assert_eq!(report.summary.efficiency_percent, 77.8);

    let map = report::render_map(&grid, &report);
    for row in map.lines() {
        assert_eq!(row, "ooo#...");
    }
}

#[test]
fn test_config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[tool]\nradius = 2\n\n[table]\nsize = 10\n\n[planner]\nstrategy = \"ida-star\"\n",
    )
    .unwrap();

    let config = Config::load_from_file(&config_path).unwrap();
    assert_eq!(config.planner.strategy, SearchStrategy::IdaStar);

    let grid = load_table(&config).unwrap();
    let report = plan(&grid, config.planner_options(), &mut RecordingObserver::new()).unwrap();
    assert_eq!(report.summary.visited_cells, 64);
    assert_eq!(report.summary.covered_cells, 96);
    assert_eq!(report.summary.efficiency_percent, 100.0);
}

#[test]
fn test_json_report_feeds_gcode_export() {
    let grid = xycover::ObstacleGrid::new(6);
    let config = {
        let mut c = Config::new();
        c.tool.radius = 1;
        c
    };
    let report = plan(&grid, config.planner_options(), &mut RecordingObserver::new()).unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    let restored: CoverageReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, report);

    let path = CoveragePath::from_steps(restored.path);
    assert!(path.is_continuous());
    let gcode = PathGcodeExporter::new(config.gcode.clone())
        .generate(&path)
        .unwrap();
    assert!(gcode.starts_with("; Coverage Toolpath"));
    assert!(gcode.contains("G0 X2.500 Y2.500"));
    assert!(gcode.trim_end().ends_with("M30"));
}

#[test]
fn test_invalid_table_is_rejected_before_run() {
    let grid = xycover::ObstacleGrid::new(4);
    let config = Config::new();
    let err = plan(&grid, config.planner_options(), &mut RecordingObserver::new()).unwrap_err();
    assert!(matches!(
        err,
        xycover::CoverageError::InvalidConfiguration { radius: 2, size: 4 }
    ));
}

#[test]
fn test_missing_layout_has_context() {
    let mut config = Config::new();
    config.table.layout = Some(PathBuf::from("/nonexistent/table.txt"));
    let err = load_table(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read layout"));
}
