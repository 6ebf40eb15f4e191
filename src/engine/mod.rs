//! Placement and routing engine
//!
//! This module takes a grid and a list of symbol requests, places every
//! instance it can, and (for activities that need it) connects the placed
//! codes with ink paths.

pub mod config;
pub mod placement;
pub mod routing;
pub mod types;

pub use config::{
    Axis, ManufacturingRules, PlacementConfig, PlacementParams, RoutingConfig, MAX_SPAN_CELLS,
    MIN_PLACEMENT_ATTEMPTS,
};
pub use placement::{candidate_cells, place_best_of, place_codes};
pub use routing::{connect_codes, l_path, nearest_successor, RoutedPath, RoutingReport, SkippedConnection};
pub use types::*;
