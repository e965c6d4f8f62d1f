//! Tool footprint geometry.
//!
//! A circular tool of radius `R` centered on a cell occupies every offset
//! whose Euclidean norm is at most `R - 1` (the "coverage template"). The
//! "shell template" keeps only the offsets on the footprint's boundary and
//! is used for cheaper incremental coverage marking once the first full
//! footprint has been applied.
//!
//! Templates are pure functions of the radius and are computed once. No
//! bounds checking happens here; callers must only translate templates to
//! centers whose footprint fits on the table.

use crate::cell::{Cell, Offset};
use std::collections::HashSet;

/// Builds the full coverage template for a tool of the given radius.
///
/// Offsets are returned sorted by `dx`, then `dy`.
pub fn build_coverage_template(radius: u32) -> Vec<Offset> {
    let r = radius.saturating_sub(1) as i32;
    let limit = i64::from(r) * i64::from(r);

    let mut template = Vec::new();
    for dx in -r..=r {
        for dy in -r..=r {
            // Integer comparison of squared norms avoids float rounding at the rim
            if i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy) <= limit {
                template.push(Offset::new(dx, dy));
            }
        }
    }
    template
}

/// Selects the boundary offsets of a coverage template: those missing at
/// least one of their four axis-aligned neighbours in the template.
pub fn build_shell_template(coverage: &[Offset]) -> Vec<Offset> {
    let members: HashSet<Offset> = coverage.iter().copied().collect();

    coverage
        .iter()
        .copied()
        .filter(|o| {
            let around = [
                Offset::new(o.dx - 1, o.dy),
                Offset::new(o.dx, o.dy - 1),
                Offset::new(o.dx + 1, o.dy),
                Offset::new(o.dx, o.dy + 1),
            ];
            !around.iter().all(|n| members.contains(n))
        })
        .collect()
}

/// Cached coverage and shell templates for one tool radius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFootprint {
    radius: u32,
    coverage: Vec<Offset>,
    shell: Vec<Offset>,
}

impl ToolFootprint {
    /// Computes both templates for `radius`.
    pub fn new(radius: u32) -> Self {
        let coverage = build_coverage_template(radius);
        let shell = build_shell_template(&coverage);
        Self {
            radius,
            coverage,
            shell,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Full coverage template offsets.
    pub fn coverage_template(&self) -> &[Offset] {
        &self.coverage
    }

    /// Boundary-only template offsets.
    pub fn shell_template(&self) -> &[Offset] {
        &self.shell
    }

    /// Cells occupied by the tool centered at `center`.
    pub fn coverage(&self, center: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.coverage.iter().map(move |&o| center + o)
    }

    /// Boundary cells of the tool centered at `center`.
    pub fn shell(&self, center: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.shell.iter().map(move |&o| center + o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_one_is_single_cell() {
        let fp = ToolFootprint::new(1);
        assert_eq!(fp.coverage_template(), &[Offset::ZERO]);
        assert_eq!(fp.shell_template(), &[Offset::ZERO]);
    }

    #[test]
    fn test_radius_two_is_plus_shape() {
        let fp = ToolFootprint::new(2);
        assert_eq!(
            fp.coverage_template(),
            &[
                Offset::new(-1, 0),
                Offset::new(0, -1),
                Offset::new(0, 0),
                Offset::new(0, 1),
                Offset::new(1, 0),
            ]
        );
        // The center has all four neighbours, so only the arms are shell
        assert_eq!(fp.shell_template().len(), 4);
        assert!(!fp.shell_template().contains(&Offset::ZERO));
    }

    #[test]
    fn test_radius_three_disc() {
        // r = 2: the 5x5 square minus its four corners
        let fp = ToolFootprint::new(3);
        assert_eq!(fp.coverage_template().len(), 13);
        assert!(fp.coverage_template().contains(&Offset::new(2, 0)));
        assert!(!fp.coverage_template().contains(&Offset::new(2, 1)));
        assert!(!fp.coverage_template().contains(&Offset::new(2, 2)));
        assert!(!fp.shell_template().contains(&Offset::ZERO));
        assert!(!fp.shell_template().contains(&Offset::new(1, 0)));
        assert!(fp.shell_template().contains(&Offset::new(1, 1)));
    }

    #[test]
    fn test_translation() {
        let fp = ToolFootprint::new(2);
        let cells: Vec<Cell> = fp.coverage(Cell::new(5, 5)).collect();
        assert!(cells.contains(&Cell::new(4, 5)));
        assert!(cells.contains(&Cell::new(5, 6)));
        assert_eq!(cells.len(), 5);

        let shell: Vec<Cell> = fp.shell(Cell::new(5, 5)).collect();
        assert!(!shell.contains(&Cell::new(5, 5)));
    }

    #[test]
    fn test_radius_zero_degenerates() {
        assert_eq!(build_coverage_template(0), vec![Offset::ZERO]);
    }
}
