//! Core types shared by placement and routing

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::grid::{Coord, Grid};

/// Orientation a color sequence is laid along, starting from its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopToBottom,
        Direction::BottomToTop,
        Direction::LeftToRight,
        Direction::RightToLeft,
    ];

    /// One forward step as (row, col) delta
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::TopToBottom => (1, 0),
            Direction::BottomToTop => (-1, 0),
            Direction::LeftToRight => (0, 1),
            Direction::RightToLeft => (0, -1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TopToBottom => "top_to_bottom",
            Direction::BottomToTop => "bottom_to_top",
            Direction::LeftToRight => "left_to_right",
            Direction::RightToLeft => "right_to_left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully placed instance
///
/// `coordinates` holds every written cell in forward order: `padding` ink
/// cells, the color cells, then `padding` ink cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedCode {
    pub name: String,
    pub direction: Direction,
    pub coordinates: Vec<Coord>,
    pub padding: usize,
}

impl PlacedCode {
    /// The cells carrying the symbol's own colors
    pub fn color_cells(&self) -> &[Coord] {
        let len = self.coordinates.len();
        if len < 2 * self.padding {
            return &[];
        }
        &self.coordinates[self.padding..len - self.padding]
    }

    pub fn first_color_cell(&self) -> Option<Coord> {
        self.color_cells().first().copied()
    }

    pub fn last_color_cell(&self) -> Option<Coord> {
        self.color_cells().last().copied()
    }

    /// Whether `coord` was written by this instance, padding included
    pub fn occupies(&self, coord: Coord) -> bool {
        self.coordinates.contains(&coord)
    }
}

/// Counters collected while placing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementStats {
    /// Random origins drawn across all passes
    pub origin_draws: usize,
    /// Whole-grid passes run
    pub grid_attempts: usize,
    pub elapsed: Duration,
}

/// Result of a placement pass, or of the best pass among several
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub grid: Grid,
    pub placed: Vec<PlacedCode>,
    /// One symbol name per unplaceable instance
    pub failures: Vec<String>,
    pub stats: PlacementStats,
}

impl PlacementOutcome {
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(coordinates: Vec<Coord>, padding: usize) -> PlacedCode {
        PlacedCode {
            name: "test".to_string(),
            direction: Direction::LeftToRight,
            coordinates,
            padding,
        }
    }

    #[test]
    fn test_direction_steps_are_unit() {
        for direction in Direction::ALL {
            let (dr, dc) = direction.step();
            assert_eq!(dr.abs() + dc.abs(), 1, "{}", direction);
        }
    }

    #[test]
    fn test_color_cells_strip_padding() {
        let coords: Vec<Coord> = (0..7).map(|c| Coord::new(4, c)).collect();
        let code = placed(coords, 2);
        assert_eq!(
            code.color_cells(),
            &[Coord::new(4, 2), Coord::new(4, 3), Coord::new(4, 4)]
        );
        assert_eq!(code.first_color_cell(), Some(Coord::new(4, 2)));
        assert_eq!(code.last_color_cell(), Some(Coord::new(4, 4)));
        assert!(code.occupies(Coord::new(4, 0)));
    }

    #[test]
    fn test_empty_coordinates_have_no_color_cells() {
        let code = placed(Vec::new(), 2);
        assert!(code.color_cells().is_empty());
        assert_eq!(code.first_color_cell(), None);
    }
}
