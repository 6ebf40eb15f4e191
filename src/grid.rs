//! The addressable cell matrix
//!
//! A sheet is a `rows x cols` matrix of square cells indexed `[row][col]`.
//! The size is derived from a physical paper size and a fixed cell edge
//! length in millimetres.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Color;
use crate::error::ConfigError;

/// A cell position, `row` first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(&self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Squared Euclidean distance, kept integral so separation checks never
    /// round
    pub fn distance_squared(&self, other: Coord) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr * dr + dc * dc
    }

    /// Offset by a signed delta, `None` when it would go below zero
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Coord> {
        Some(Coord {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One grid square. No color means unpainted (white).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub color: Option<Color>,
    /// Matrix position, stamped by [`Grid::finalize`]
    pub coord: Option<Coord>,
}

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    Letter,
    Legal,
}

impl PaperSize {
    pub const ALL: [PaperSize; 4] = [
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::Letter,
        PaperSize::Legal,
    ];

    /// Portrait (width, height) in millimetres
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
        }
    }

    /// Share of the (width, height) left for the grid once the sheet's
    /// title and legend are laid out
    pub fn printable_scale(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (1.0, 0.82),
            PaperSize::A3 => (1.02, 0.88),
            PaperSize::Letter => (1.05, 0.87),
            PaperSize::Legal => (1.05, 0.88),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A3 => "A3",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
        }
    }
}

impl FromStr for PaperSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PaperSize::ALL
            .into_iter()
            .find(|paper| paper.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnsupportedPaperSize(trimmed.to_string()))
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Physical description a grid is derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub cell_size_mm: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Landscape,
            cell_size_mm: 5.0,
        }
    }
}

impl GridSpec {
    pub fn new(paper: PaperSize) -> Self {
        Self {
            paper,
            ..Self::default()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_cell_size(mut self, cell_size_mm: f64) -> Self {
        self.cell_size_mm = cell_size_mm;
        self
    }

    /// Validated cell edge length
    pub fn cell_size(&self) -> Result<f64, ConfigError> {
        if self.cell_size_mm.is_finite() && self.cell_size_mm > 0.0 {
            Ok(self.cell_size_mm)
        } else {
            Err(ConfigError::InvalidCellSize(self.cell_size_mm))
        }
    }

    /// Grid size as (rows, cols)
    pub fn dimensions(&self) -> Result<(usize, usize), ConfigError> {
        let cell = self.cell_size()?;
        let (mut width, mut height) = self.paper.dimensions_mm();
        if self.orientation == Orientation::Landscape {
            std::mem::swap(&mut width, &mut height);
        }
        let (scale_w, scale_h) = self.paper.printable_scale();

        let cols = (width * scale_w / cell).floor() as usize;
        let rows = (height * scale_h / cell).floor() as usize;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        Ok((rows, cols))
    }
}

/// Rectangular cell matrix, exclusively owned by one generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an unpainted grid
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![vec![Cell::default(); cols]; rows],
        })
    }

    pub fn from_spec(spec: &GridSpec) -> Result<Self, ConfigError> {
        let (rows, cols) = spec.dimensions()?;
        Self::new(rows, cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(coord.row)?.get(coord.col)
    }

    pub fn color_at(&self, coord: Coord) -> Option<Color> {
        self.get(coord).and_then(|cell| cell.color)
    }

    pub fn is_painted(&self, coord: Coord) -> bool {
        self.color_at(coord).is_some()
    }

    /// Set a cell's color. Returns false when `coord` is outside the grid.
    pub fn paint(&mut self, coord: Coord, color: Color) -> bool {
        match self
            .cells
            .get_mut(coord.row)
            .and_then(|row| row.get_mut(coord.col))
        {
            Some(cell) => {
                cell.color = Some(color);
                true
            }
            None => false,
        }
    }

    pub fn painted_count(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.color.is_some()).count()
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Coord::new(row, col), cell))
        })
    }

    /// Stamp every cell with its matrix position
    pub fn finalize(&mut self) {
        for (row, cells) in self.cells.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                cell.coord = Some(Coord::new(row, col));
            }
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.iter()
            .all(|(coord, cell)| cell.coord == Some(coord))
    }
}
