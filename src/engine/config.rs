//! Configuration for the placement and routing engine

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lowest per-instance attempt ceiling a configuration may ask for
pub const MIN_PLACEMENT_ATTEMPTS: usize = 1_000;

/// Longest distance, in cells, a gap, margin or padding may resolve to
pub const MAX_SPAN_CELLS: usize = 10_000;

/// Placement configuration in physical units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum gap between two color codes, millimetres
    pub code_gap_mm: f64,

    /// White space kept between any code and the sheet edge, millimetres
    pub edge_white_space_mm: f64,

    /// Ink cells written before and after every color sequence
    pub padding_cells: usize,

    /// Origin draws per instance before it is reported as unplaceable;
    /// at least [`MIN_PLACEMENT_ATTEMPTS`]
    pub max_attempts: usize,

    /// Whole-grid placement passes; the pass with the fewest failures wins
    pub grid_attempts: usize,

    /// Shuffle the four directions at each origin instead of trying them in
    /// declaration order
    pub shuffle_directions: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            code_gap_mm: 51.0,
            edge_white_space_mm: 12.0,
            padding_cells: 2,
            max_attempts: 10_000,
            grid_attempts: 3,
            shuffle_directions: true,
        }
    }
}

impl PlacementConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum gap between codes
    pub fn with_code_gap(mut self, millimetres: f64) -> Self {
        self.code_gap_mm = millimetres;
        self
    }

    /// Set the edge white space
    pub fn with_edge_white_space(mut self, millimetres: f64) -> Self {
        self.edge_white_space_mm = millimetres;
        self
    }

    /// Set the padding length in cells
    pub fn with_padding(mut self, cells: usize) -> Self {
        self.padding_cells = cells;
        self
    }

    /// Set the per-instance attempt ceiling
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the number of whole-grid passes
    pub fn with_grid_attempts(mut self, attempts: usize) -> Self {
        self.grid_attempts = attempts;
        self
    }

    pub fn with_shuffle_directions(mut self, shuffle: bool) -> Self {
        self.shuffle_directions = shuffle;
        self
    }

    /// Convert to cell units for a given cell edge length
    pub fn resolve(&self, cell_size_mm: f64) -> Result<PlacementParams, ConfigError> {
        if !(cell_size_mm.is_finite() && cell_size_mm > 0.0) {
            return Err(ConfigError::InvalidCellSize(cell_size_mm));
        }
        if !(self.code_gap_mm.is_finite() && self.code_gap_mm > 0.0) {
            return Err(ConfigError::invalid_placement(format!(
                "code gap must be positive (got {} mm)",
                self.code_gap_mm
            )));
        }
        if !(self.edge_white_space_mm.is_finite() && self.edge_white_space_mm >= 0.0) {
            return Err(ConfigError::invalid_placement(format!(
                "edge white space cannot be negative (got {} mm)",
                self.edge_white_space_mm
            )));
        }
        if self.max_attempts < MIN_PLACEMENT_ATTEMPTS {
            return Err(ConfigError::invalid_placement(format!(
                "max_attempts must be at least {} (got {})",
                MIN_PLACEMENT_ATTEMPTS, self.max_attempts
            )));
        }
        if self.grid_attempts == 0 {
            return Err(ConfigError::invalid_placement(
                "grid_attempts must be at least 1",
            ));
        }

        if self.padding_cells > MAX_SPAN_CELLS {
            return Err(ConfigError::invalid_placement(format!(
                "padding_cells must be at most {} (got {})",
                MAX_SPAN_CELLS, self.padding_cells
            )));
        }

        Ok(PlacementParams {
            min_separation: span_cells("code gap", self.code_gap_mm, cell_size_mm)?,
            edge_margin: span_cells("edge white space", self.edge_white_space_mm, cell_size_mm)?,
            padding: self.padding_cells,
            max_attempts: self.max_attempts,
            grid_attempts: self.grid_attempts,
            shuffle_directions: self.shuffle_directions,
        })
    }
}

/// Round a millimetre distance up to whole cells, bounded by
/// [`MAX_SPAN_CELLS`]
fn span_cells(label: &str, millimetres: f64, cell_size_mm: f64) -> Result<usize, ConfigError> {
    let cells = (millimetres / cell_size_mm).ceil();
    if cells > MAX_SPAN_CELLS as f64 {
        return Err(ConfigError::invalid_placement(format!(
            "{} of {} mm spans more than {} cells",
            label, millimetres, MAX_SPAN_CELLS
        )));
    }
    Ok(cells as usize)
}

/// Placement parameters in cell units, as consumed by the engine
///
/// Built directly (bypassing [`PlacementConfig::resolve`]) the values are not
/// bounded; tests use this for small attempt ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementParams {
    /// Minimum Euclidean distance between cells of different instances
    pub min_separation: usize,
    /// Minimum distance from any occupied cell to the grid boundary
    pub edge_margin: usize,
    pub padding: usize,
    pub max_attempts: usize,
    pub grid_attempts: usize,
    pub shuffle_directions: bool,
}

impl Default for PlacementParams {
    fn default() -> Self {
        // Defaults at the standard 5 mm cell
        Self {
            min_separation: 11,
            edge_margin: 3,
            padding: 2,
            max_attempts: 10_000,
            grid_attempts: 3,
            shuffle_directions: true,
        }
    }
}

/// Axis a connective path travels along first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Rows,
    Columns,
}

/// Manufacturability rules that are named but not yet enforced by routing
///
/// Setting any of them makes routing log a warning and list the rule as
/// unenforced in its report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManufacturingRules {
    /// Minimum spacing between parallel tracks, millimetres
    pub parallel_track_gap_mm: Option<f64>,
    /// Minimum clearance around a 90-degree turn, millimetres
    pub min_turn_clearance_mm: Option<f64>,
    /// Dead-end lines added to misdirect the reader
    pub decoy_lines: usize,
}

impl ManufacturingRules {
    /// Names of the rules the caller asked for
    pub fn requested(&self) -> Vec<&'static str> {
        let mut rules = Vec::new();
        if self.parallel_track_gap_mm.is_some() {
            rules.push("parallel_track_gap");
        }
        if self.min_turn_clearance_mm.is_some() {
            rules.push("min_turn_clearance");
        }
        if self.decoy_lines > 0 {
            rules.push("decoy_lines");
        }
        rules
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub first_axis: Axis,
    pub manufacturing: ManufacturingRules,
}

impl RoutingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_axis(mut self, axis: Axis) -> Self {
        self.first_axis = axis;
        self
    }

    pub fn with_manufacturing(mut self, rules: ManufacturingRules) -> Self {
        self.manufacturing = rules;
        self
    }
}
