//! Colorcode Maze - activity sheet generator for line-following robots
//!
//! This library places short color-code sequences onto a printable cell grid
//! and, for maze-style activities, connects them with ink paths the robot can
//! follow.
//!
//! # Example
//!
//! ```rust
//! use colorcode_maze::{generate_seeded, ActivityKind, GenerateConfig, GenerateRequest, Tier};
//!
//! let request = GenerateRequest::new(Tier::Easy).with_activity(ActivityKind::Maze);
//! let sheet = generate_seeded(&request, &GenerateConfig::default(), 7).unwrap();
//!
//! assert_eq!(sheet.grid.rows(), 34);
//! assert_eq!(sheet.placed.len() + sheet.failures.len(), sheet.requested_total());
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod grid;
pub mod palette;
pub mod quantity;

pub use catalog::{Color, Level, Symbol, CATALOG, INK};
pub use config::{ConfigFileError, GenerateConfig};
pub use engine::{
    PlacedCode, PlacementConfig, PlacementParams, PlacementStats, RoutingConfig, RoutingReport,
};
pub use error::ConfigError;
pub use grid::{Coord, Grid, GridSpec, Orientation, PaperSize};
pub use palette::{Palette, PaletteError};
pub use quantity::{Difficulty, QuantityRange, QuantityTable, SymbolRequest, Tier};

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Longest color sequence a code may have
pub const MAX_CODE_LENGTH: usize = 3;

/// Kind of activity sheet being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    /// Codes joined by a single followable line
    #[default]
    Maze,
    /// Codes joined by a road the robot has to navigate
    RoadChallenge,
    /// Codes scattered for the user to draw their own city
    CityChallenge,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Maze,
        ActivityKind::RoadChallenge,
        ActivityKind::CityChallenge,
    ];

    /// Whether placed codes are connected by ink paths
    pub fn requires_routing(self) -> bool {
        match self {
            ActivityKind::Maze | ActivityKind::RoadChallenge => true,
            ActivityKind::CityChallenge => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Maze => "maze",
            ActivityKind::RoadChallenge => "road-challenge",
            ActivityKind::CityChallenge => "city-challenge",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ConfigError;

    /// Accepts kebab-case or snake_case, with or without an `ozobot` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let name = normalized
            .strip_prefix("ozobot-")
            .unwrap_or(normalized.as_str());
        ActivityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownActivity(s.to_string()))
    }
}

/// One sheet to generate
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub grid: GridSpec,
    pub difficulty: Difficulty,
    pub activity: ActivityKind,
}

impl GenerateRequest {
    /// Default landscape A4 maze at the given difficulty
    pub fn new(difficulty: impl Into<Difficulty>) -> Self {
        Self {
            grid: GridSpec::default(),
            difficulty: difficulty.into(),
            activity: ActivityKind::default(),
        }
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_activity(mut self, activity: ActivityKind) -> Self {
        self.activity = activity;
        self
    }
}

/// A generated sheet
///
/// Instances that could not be placed are listed in `failures`; they never
/// turn the whole request into an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Painted grid with every cell coordinate stamped
    pub grid: Grid,
    pub requests: Vec<SymbolRequest>,
    /// Placed codes in placement order
    pub placed: Vec<PlacedCode>,
    /// One symbol name per unplaced instance
    pub failures: Vec<String>,
    /// Present for activities that connect their codes
    pub routing: Option<RoutingReport>,
    pub stats: PlacementStats,
}

impl Sheet {
    pub fn requested_total(&self) -> usize {
        quantity::total_instances(&self.requests)
    }

    /// Symbol name and requested quantity, in request order
    ///
    /// This is the data a legend printed beside the grid is built from.
    pub fn requested_quantities(&self) -> Vec<(&'static str, usize)> {
        self.requests
            .iter()
            .map(|request| (request.symbol.name, request.quantity))
            .collect()
    }

    /// User-facing message when some instances could not be placed
    pub fn failure_summary(&self) -> Option<String> {
        match self.failures.len() {
            0 => None,
            1 => Some(
                "1 color code could not be placed; try a larger page or lower difficulty"
                    .to_string(),
            ),
            n => Some(format!(
                "{} color codes could not be placed; try a larger page or lower difficulty",
                n
            )),
        }
    }
}

/// Generate a sheet with a caller-supplied random source
///
/// Fails only on invalid configuration. The same request, configuration and
/// random source state always produce the same sheet.
pub fn generate<R: Rng>(
    request: &GenerateRequest,
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<Sheet, ConfigError> {
    config.validate()?;
    let grid = Grid::from_spec(&request.grid)?;
    let params = config.placement.resolve(request.grid.cell_size()?)?;
    let requests = quantity::resolve_quantities(&request.difficulty, &config.quantities, rng)?;

    info!(
        paper = %request.grid.paper,
        rows = grid.rows(),
        cols = grid.cols(),
        difficulty = %request.difficulty,
        activity = %request.activity,
        "Generating sheet"
    );

    generate_on_grid(
        grid,
        requests,
        request.activity,
        &params,
        &config.routing,
        rng,
    )
}

/// Generate a sheet from a fixed seed
///
/// ```rust
/// use colorcode_maze::{generate_seeded, GenerateConfig, GenerateRequest, Tier};
///
/// let request = GenerateRequest::new(Tier::Medium);
/// let a = generate_seeded(&request, &GenerateConfig::default(), 42).unwrap();
/// let b = generate_seeded(&request, &GenerateConfig::default(), 42).unwrap();
/// assert_eq!(a.grid, b.grid);
/// ```
pub fn generate_seeded(
    request: &GenerateRequest,
    config: &GenerateConfig,
    seed: u64,
) -> Result<Sheet, ConfigError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(request, config, &mut rng)
}

/// Place and, when the activity needs it, route explicit requests on a grid
///
/// Lower-level entry point for callers that build their own grid or symbols.
pub fn generate_on_grid<R: Rng>(
    grid: Grid,
    requests: Vec<SymbolRequest>,
    activity: ActivityKind,
    params: &PlacementParams,
    routing: &RoutingConfig,
    rng: &mut R,
) -> Result<Sheet, ConfigError> {
    for request in &requests {
        validate_symbol(&request.symbol)?;
    }

    let outcome = engine::place_best_of(&grid, &requests, params, rng);
    let mut grid = outcome.grid;

    let routing = if activity.requires_routing() {
        Some(engine::connect_codes(&mut grid, &outcome.placed, routing))
    } else {
        debug!(activity = %activity, "Activity does not connect its codes");
        None
    };

    grid.finalize();

    Ok(Sheet {
        grid,
        requests,
        placed: outcome.placed,
        failures: outcome.failures,
        routing,
        stats: outcome.stats,
    })
}

fn validate_symbol(symbol: &Symbol) -> Result<(), ConfigError> {
    if symbol.colors.is_empty() {
        return Err(ConfigError::invalid_symbol(
            symbol.name,
            "color sequence is empty",
        ));
    }
    if symbol.colors.len() > MAX_CODE_LENGTH {
        return Err(ConfigError::invalid_symbol(
            symbol.name,
            format!(
                "{} colors, at most {} are readable",
                symbol.colors.len(),
                MAX_CODE_LENGTH
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> PlacementParams {
        PlacementParams {
            min_separation: 4,
            edge_margin: 1,
            padding: 1,
            max_attempts: 200,
            grid_attempts: 2,
            shuffle_directions: true,
        }
    }

    fn quick_config() -> GenerateConfig {
        GenerateConfig::new().with_placement(PlacementConfig::new().with_max_attempts(1_000))
    }

    #[test]
    fn test_activity_from_str() {
        assert_eq!("maze".parse::<ActivityKind>(), Ok(ActivityKind::Maze));
        assert_eq!(
            "ozobot_road_challenge".parse::<ActivityKind>(),
            Ok(ActivityKind::RoadChallenge)
        );
        assert_eq!(
            "City-Challenge".parse::<ActivityKind>(),
            Ok(ActivityKind::CityChallenge)
        );
        assert_eq!(
            "racetrack".parse::<ActivityKind>(),
            Err(ConfigError::UnknownActivity("racetrack".to_string()))
        );
    }

    #[test]
    fn test_requires_routing() {
        assert!(ActivityKind::Maze.requires_routing());
        assert!(ActivityKind::RoadChallenge.requires_routing());
        assert!(!ActivityKind::CityChallenge.requires_routing());
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let request = GenerateRequest::new(Tier::EasyMedium);
        let config = quick_config();
        let a = generate_seeded(&request, &config, 11).unwrap();
        let b = generate_seeded(&request, &config, 11).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.placed, b.placed);
        assert_eq!(a.failures, b.failures);
    }

    #[test]
    fn test_generate_finalizes_grid() {
        let sheet = generate_seeded(&GenerateRequest::new(Tier::Easy), &quick_config(), 3).unwrap();
        assert!(sheet.grid.is_finalized());
        assert_eq!(sheet.placed.len() + sheet.failures.len(), sheet.requested_total());
    }

    #[test]
    fn test_city_challenge_skips_routing() {
        let request = GenerateRequest::new(Tier::Easy).with_activity(ActivityKind::CityChallenge);
        let sheet = generate_seeded(&request, &quick_config(), 5).unwrap();
        assert!(sheet.routing.is_none());
    }

    #[test]
    fn test_invalid_cell_size_aborts() {
        let request = GenerateRequest::new(Tier::Easy)
            .with_grid(GridSpec::new(PaperSize::A4).with_cell_size(0.0));
        assert_eq!(
            generate_seeded(&request, &GenerateConfig::default(), 1),
            Err(ConfigError::InvalidCellSize(0.0))
        );
    }

    #[test]
    fn test_inverted_quantity_range_aborts() {
        let config = GenerateConfig::new().with_quantities(
            QuantityTable::default().with_range(Tier::Easy, QuantityRange::new(3, 1)),
        );
        let result = generate_seeded(&GenerateRequest::new(Tier::Easy), &config, 1);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidQuantityRange { .. })
        ));
    }

    #[test]
    fn test_overlong_symbol_is_rejected() {
        const LONG: Symbol = Symbol {
            name: "Long",
            colors: &[Color::Red, Color::Green, Color::Blue, Color::Red],
            levels: &[],
        };
        let grid = Grid::new(20, 20).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = generate_on_grid(
            grid,
            vec![SymbolRequest::new(LONG, 1)],
            ActivityKind::Maze,
            &small_params(),
            &RoutingConfig::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(ConfigError::InvalidSymbol { .. })));
    }

    #[test]
    fn test_failure_summary() {
        let grid = Grid::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let symbol = CATALOG[0];
        let sheet = generate_on_grid(
            grid,
            vec![SymbolRequest::new(symbol, 2)],
            ActivityKind::Maze,
            &small_params(),
            &RoutingConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert!(sheet.placed.is_empty());
        assert_eq!(
            sheet.failure_summary().as_deref(),
            Some("2 color codes could not be placed; try a larger page or lower difficulty")
        );
        assert_eq!(sheet.requested_quantities(), vec![(symbol.name, 2)]);
    }
}
