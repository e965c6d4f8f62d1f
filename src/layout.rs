//! Text table layouts
//!
//! One row per line, row index is `y` and column index is `x`:
//!
//! ```text
//! ; workshop table, 6x6
//! ......
//! ..##..
//! ......
//! .X....
//! ......
//! ......
//! ```
//!
//! `#` and `X` mark rockpoints, `.` and space are free. Lines that are blank
//! or whose first non-blank character is `;` are ignored. The table must be
//! square.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use xycover_core::{CoverageError, ObstacleGrid, ObstacleMap};

fn parse_cell(c: char) -> Option<bool> {
    match c {
        '#' | 'X' => Some(true),
        '.' | ' ' => Some(false),
        _ => None,
    }
}

/// Parses a layout into an obstacle grid.
pub fn parse_layout(text: &str) -> xycover_core::Result<ObstacleGrid> {
    let mut rows: Vec<(usize, Vec<bool>)> = Vec::new();
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim_end_matches('\r');
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        let mut row = Vec::with_capacity(line.len());
        for (col, c) in line.chars().enumerate() {
            match parse_cell(c) {
                Some(rock) => row.push(rock),
                None => {
                    return Err(CoverageError::Layout {
                        line: line_no,
                        reason: format!("unexpected character '{}' in column {}", c, col + 1),
                    })
                }
            }
        }
        rows.push((line_no, row));
    }

    let size = rows.len();
    if size == 0 {
        return Err(CoverageError::Layout {
            line: last_line,
            reason: "layout has no rows".to_string(),
        });
    }
    if let Some((line, row)) = rows.iter().find(|(_, row)| row.len() != size) {
        return Err(CoverageError::Layout {
            line: *line,
            reason: format!(
                "row has {} cells but the layout has {} rows; tables must be square",
                row.len(),
                size
            ),
        });
    }

    let rows: Vec<Vec<bool>> = rows.into_iter().map(|(_, row)| row).collect();
    ObstacleGrid::from_rows(&rows)
}

/// Reads and parses a layout file.
pub fn load_layout(path: &Path) -> Result<ObstacleGrid> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout {}", path.display()))?;
    let grid = parse_layout(&text).with_context(|| format!("Invalid layout {}", path.display()))?;
    debug!(
        "Loaded {}x{} layout with {} rockpoints from {}",
        grid.size(),
        grid.size(),
        grid.obstacle_count(),
        path.display()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xycover_core::Cell;

    #[test]
    fn test_parse_rows_as_y() {
        let grid = parse_layout("...\n..#\nX..\n").unwrap();
        assert_eq!(grid.size(), 3);
        assert!(grid.is_obstacle(Cell::new(2, 1)));
        assert!(grid.is_obstacle(Cell::new(0, 2)));
        assert!(!grid.is_obstacle(Cell::new(1, 1)));
        assert_eq!(grid.obstacle_count(), 2);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "; header\n\n. .\n ; indented comment\n...\n.#.\n";
        let grid = parse_layout(text).unwrap();
        assert_eq!(grid.size(), 3);
        assert!(grid.is_obstacle(Cell::new(1, 2)));
        assert!(!grid.is_obstacle(Cell::new(1, 0)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let grid = parse_layout("..\r\n#.\r\n").unwrap();
        assert!(grid.is_obstacle(Cell::new(0, 1)));
    }

    #[test]
    fn test_rejects_unknown_character() {
        let err = parse_layout("...\n.o.\n...\n").unwrap_err();
        assert_eq!(
            err,
            CoverageError::Layout {
                line: 2,
                reason: "unexpected character 'o' in column 2".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_non_square() {
        let err = parse_layout("; table\n...\n....\n...\n").unwrap_err();
        assert!(matches!(err, CoverageError::Layout { line: 3, .. }));

        let err = parse_layout("...\n...\n").unwrap_err();
        assert!(matches!(err, CoverageError::Layout { line: 1, .. }));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            parse_layout("; nothing here\n"),
            Err(CoverageError::Layout { line: 1, .. })
        ));
    }
}
