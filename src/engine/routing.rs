//! Connective paths between placed color codes
//!
//! Codes are visited in placement order. Each code is linked to the nearest
//! later code by an L-shaped path of ink cells. Paths only paint unpainted
//! cells, so they never recolor a code or its padding.

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::INK;
use crate::grid::{Coord, Grid};

use super::config::{Axis, RoutingConfig};
use super::types::PlacedCode;

/// A path painted between two placed codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedPath {
    /// Index of the source code in placement order
    pub from: usize,
    /// Index of the target code in placement order
    pub to: usize,
    /// Cells stepped through, excluding the start cell and including the end
    pub cells: Vec<Coord>,
    /// How many of `cells` were unpainted and received ink
    pub painted: usize,
}

/// A connection that was not drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedConnection {
    pub from: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutingReport {
    pub paths: Vec<RoutedPath>,
    pub skipped: Vec<SkippedConnection>,
    /// Manufacturability rules that were requested but are not enforced
    pub unenforced: Vec<&'static str>,
}

/// Axis-aligned path from `from` to `to`
///
/// Steps one cell at a time along `first_axis` until that coordinate
/// matches, then along the other axis. The start cell is not included; the
/// end cell is, so the length equals the Manhattan distance.
pub fn l_path(from: Coord, to: Coord, first_axis: Axis) -> Vec<Coord> {
    let mut path = Vec::with_capacity(from.manhattan(to));
    let mut current = from;
    let axes = match first_axis {
        Axis::Rows => [Axis::Rows, Axis::Columns],
        Axis::Columns => [Axis::Columns, Axis::Rows],
    };

    for axis in axes {
        loop {
            let (value, target) = match axis {
                Axis::Rows => (&mut current.row, to.row),
                Axis::Columns => (&mut current.col, to.col),
            };
            if *value == target {
                break;
            }
            *value = if target > *value {
                *value + 1
            } else {
                *value - 1
            };
            path.push(current);
        }
    }
    path
}

/// Later code whose first color cell is nearest (Manhattan) to the last
/// color cell of `placed[index]`
///
/// Ties go to the earliest candidate. Candidates without coordinates are
/// ignored.
pub fn nearest_successor(index: usize, placed: &[PlacedCode]) -> Option<usize> {
    let anchor = placed.get(index)?.last_color_cell()?;

    let mut best: Option<(usize, usize)> = None;
    for (candidate, code) in placed.iter().enumerate().skip(index + 1) {
        let Some(first) = code.first_color_cell() else {
            continue;
        };
        let distance = anchor.manhattan(first);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Paint ink along `path` where cells are still unpainted; returns the
/// number of cells painted
fn paint_path(grid: &mut Grid, path: &[Coord]) -> usize {
    let mut painted = 0;
    for coord in path {
        if grid.contains(*coord) && !grid.is_painted(*coord) {
            grid.paint(*coord, INK);
            painted += 1;
        }
    }
    painted
}

/// Connect every placed code to its nearest later code
///
/// A code without coordinates, or with no later code that has coordinates,
/// is skipped and reported; the remaining connections are still drawn.
pub fn connect_codes(
    grid: &mut Grid,
    placed: &[PlacedCode],
    config: &RoutingConfig,
) -> RoutingReport {
    let mut report = RoutingReport {
        unenforced: config.manufacturing.requested(),
        ..Default::default()
    };
    for rule in &report.unenforced {
        warn!(rule = *rule, "Manufacturing rule is not enforced by routing");
    }

    for index in 0..placed.len().saturating_sub(1) {
        let current = &placed[index];
        let Some(start) = current.coordinates.last().copied() else {
            warn!(
                from = index,
                symbol = %current.name,
                "Skipping connection: code has no coordinates"
            );
            report.skipped.push(SkippedConnection {
                from: index,
                reason: format!("'{}' has no coordinates", current.name),
            });
            continue;
        };

        let target = nearest_successor(index, placed)
            .and_then(|next| Some((next, placed[next].coordinates.first().copied()?)));
        let Some((next, end)) = target else {
            warn!(
                from = index,
                symbol = %current.name,
                "Skipping connection: no later code has coordinates"
            );
            report.skipped.push(SkippedConnection {
                from: index,
                reason: format!("no reachable code after '{}'", current.name),
            });
            continue;
        };

        let cells = l_path(start, end, config.first_axis);
        let painted = paint_path(grid, &cells);
        debug!(
            from = index,
            to = next,
            length = cells.len(),
            painted,
            "Routed connection"
        );
        report.paths.push(RoutedPath {
            from: index,
            to: next,
            cells,
            painted,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Color;
    use crate::engine::config::ManufacturingRules;
    use crate::engine::types::Direction;

    fn horizontal_code(name: &str, row: usize, start_col: usize) -> PlacedCode {
        PlacedCode {
            name: name.to_string(),
            direction: Direction::LeftToRight,
            coordinates: (start_col..start_col + 3)
                .map(|col| Coord::new(row, col))
                .collect(),
            padding: 0,
        }
    }

    #[test]
    fn test_l_path_rows_first() {
        let path = l_path(Coord::new(1, 1), Coord::new(3, 4), Axis::Rows);
        assert_eq!(
            path,
            vec![
                Coord::new(2, 1),
                Coord::new(3, 1),
                Coord::new(3, 2),
                Coord::new(3, 3),
                Coord::new(3, 4),
            ]
        );
    }

    #[test]
    fn test_l_path_columns_first_moving_backwards() {
        let path = l_path(Coord::new(5, 5), Coord::new(3, 3), Axis::Columns);
        assert_eq!(
            path,
            vec![
                Coord::new(5, 4),
                Coord::new(5, 3),
                Coord::new(4, 3),
                Coord::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_l_path_same_cell_is_empty() {
        assert!(l_path(Coord::new(2, 2), Coord::new(2, 2), Axis::Rows).is_empty());
    }

    #[test]
    fn test_nearest_successor_prefers_closest_then_earliest() {
        let placed = vec![
            horizontal_code("a", 0, 0),
            horizontal_code("far", 20, 20),
            horizontal_code("near", 0, 6),
            horizontal_code("near-twin", 0, 6),
        ];
        assert_eq!(nearest_successor(0, &placed), Some(2));
        assert_eq!(nearest_successor(3, &placed), None);
    }

    #[test]
    fn test_connect_codes_paints_only_unpainted_cells() {
        let mut grid = Grid::new(10, 12).unwrap();
        let placed = vec![horizontal_code("a", 2, 0), horizontal_code("b", 2, 8)];
        for code in &placed {
            for coord in &code.coordinates {
                grid.paint(*coord, Color::Green);
            }
        }

        let report = connect_codes(&mut grid, &placed, &RoutingConfig::default());
        assert_eq!(report.paths.len(), 1);
        let path = &report.paths[0];
        assert_eq!(path.cells.len(), 6);
        assert_eq!(path.painted, 5);
        assert_eq!(grid.color_at(Coord::new(2, 5)), Some(INK));
        assert_eq!(grid.color_at(Coord::new(2, 8)), Some(Color::Green));
    }

    #[test]
    fn test_connect_codes_reports_unenforced_rules() {
        let mut grid = Grid::new(4, 4).unwrap();
        let config = RoutingConfig::new().with_manufacturing(ManufacturingRules {
            min_turn_clearance_mm: Some(25.0),
            ..Default::default()
        });
        let report = connect_codes(&mut grid, &[], &config);
        assert_eq!(report.unenforced, vec!["min_turn_clearance"]);
        assert!(report.paths.is_empty());
    }
}
