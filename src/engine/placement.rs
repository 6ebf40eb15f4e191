//! Randomized placement of color code instances
//!
//! Each instance draws random origins until one of the four directions at
//! that origin yields a run of cells that is inside the margins, unpainted,
//! and far enough from every previously placed cell. An instance that
//! exhausts its attempt ceiling is recorded as a failure and placement moves
//! on; one failure never aborts the pass.
//!
//! ## Key Functions
//!
//! - [`place_codes`]: a single placement pass over a grid
//! - [`place_best_of`]: repeated passes on fresh copies of a grid, keeping the
//!   pass with the fewest failures
//! - [`candidate_cells`]: the ordered cell run for one origin and direction

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::catalog::{Symbol, INK};
use crate::grid::{Coord, Grid};
use crate::quantity::{total_instances, SymbolRequest};

use super::config::PlacementParams;
use super::types::*;

/// Ordered cells covered by a symbol laid from `origin` along `direction`
///
/// `origin` is the first color cell; `padding` cells precede it and follow
/// the last color cell. Returns `None` when any cell falls off the matrix.
/// A run too long to index also yields `None`.
pub fn candidate_cells(
    grid: &Grid,
    origin: Coord,
    direction: Direction,
    footprint: usize,
    padding: usize,
) -> Option<Vec<Coord>> {
    let (dr, dc) = direction.step();
    let first = isize::try_from(padding).ok()?.checked_neg()?;
    let end = isize::try_from(footprint.checked_add(padding)?).ok()?;

    (first..end)
        .map(|k| {
            origin
                .offset(dr * k, dc * k)
                .filter(|coord| grid.contains(*coord))
        })
        .collect()
}

/// Whether `coord` keeps at least `margin` cells to every grid edge
fn within_margins(grid: &Grid, coord: Coord, margin: usize) -> bool {
    coord.row >= margin
        && coord.col >= margin
        && coord.row.saturating_add(margin) < grid.rows()
        && coord.col.saturating_add(margin) < grid.cols()
}

/// Whether every candidate cell is at least `min_separation` away from every
/// occupied cell
fn is_separated(cells: &[Coord], occupied: &[Coord], min_separation: usize) -> bool {
    let min_squared = min_separation.saturating_mul(min_separation);
    cells.iter().all(|cell| {
        occupied
            .iter()
            .all(|placed| cell.distance_squared(*placed) >= min_squared)
    })
}

/// Write padding and color cells for an accepted candidate
fn commit(grid: &mut Grid, symbol: &Symbol, cells: &[Coord], padding: usize) {
    for (index, cell) in cells.iter().enumerate() {
        let color = index
            .checked_sub(padding)
            .and_then(|i| symbol.colors.get(i).copied())
            .unwrap_or(INK);
        grid.paint(*cell, color);
    }
}

/// Try origins until one direction validates; returns the placement (if
/// any) and the number of origins drawn
fn place_instance<R: Rng>(
    grid: &mut Grid,
    symbol: &Symbol,
    occupied: &mut Vec<Coord>,
    params: &PlacementParams,
    rng: &mut R,
) -> (Option<PlacedCode>, usize) {
    let margin = params.edge_margin;
    let mut directions = Direction::ALL;

    for attempt in 1..=params.max_attempts {
        let origin = Coord::new(
            rng.gen_range(margin..grid.rows() - margin),
            rng.gen_range(margin..grid.cols() - margin),
        );
        if params.shuffle_directions {
            directions.shuffle(rng);
        }

        for &direction in &directions {
            let Some(cells) =
                candidate_cells(grid, origin, direction, symbol.footprint(), params.padding)
            else {
                continue;
            };

            let cells_free = cells
                .iter()
                .all(|cell| within_margins(grid, *cell, margin) && !grid.is_painted(*cell));
            if !cells_free || !is_separated(&cells, occupied, params.min_separation) {
                continue;
            }

            commit(grid, symbol, &cells, params.padding);
            occupied.extend_from_slice(&cells);
            return (
                Some(PlacedCode {
                    name: symbol.name.to_string(),
                    direction,
                    coordinates: cells,
                    padding: params.padding,
                }),
                attempt,
            );
        }
    }

    (None, params.max_attempts)
}

/// Run one placement pass, painting every placed instance onto `grid`
///
/// Requests are processed in order, instance by instance. The returned
/// outcome owns the painted grid.
pub fn place_codes<R: Rng>(
    mut grid: Grid,
    requests: &[SymbolRequest],
    params: &PlacementParams,
    rng: &mut R,
) -> PlacementOutcome {
    let started = Instant::now();
    let mut occupied: Vec<Coord> = Vec::new();
    let mut placed = Vec::new();
    let mut failures = Vec::new();
    let mut origin_draws = 0;

    // Origins are drawn from [margin, dim - margin); an empty range means no
    // instance can ever fit.
    let margin = params.edge_margin;
    let has_room = margin
        .checked_mul(2)
        .is_some_and(|span| grid.rows() > span && grid.cols() > span);
    if !has_room && total_instances(requests) > 0 {
        warn!(
            rows = grid.rows(),
            cols = grid.cols(),
            edge_margin = margin,
            "Grid leaves no room inside the edge margins"
        );
    }

    for request in requests {
        for instance in 0..request.quantity {
            let (result, draws) = if has_room {
                place_instance(&mut grid, &request.symbol, &mut occupied, params, rng)
            } else {
                (None, 0)
            };
            origin_draws += draws;

            match result {
                Some(code) => placed.push(code),
                None => {
                    warn!(
                        symbol = request.symbol.name,
                        instance = instance + 1,
                        quantity = request.quantity,
                        attempts = draws,
                        "Could not place color code"
                    );
                    failures.push(request.symbol.name.to_string());
                }
            }
        }
    }

    let elapsed = started.elapsed();
    debug!(
        placed = placed.len(),
        failed = failures.len(),
        origin_draws,
        elapsed_ms = elapsed.as_millis() as u64,
        "Placement pass finished"
    );

    PlacementOutcome {
        grid,
        placed,
        failures,
        stats: PlacementStats {
            origin_draws,
            grid_attempts: 1,
            elapsed,
        },
    }
}

/// Best-of-N placement over fresh copies of `template`
///
/// Runs up to `params.grid_attempts` independent passes and keeps the one
/// with the fewest failures (the earliest on ties). Stops as soon as a pass
/// places everything. Passes are never merged.
pub fn place_best_of<R: Rng>(
    template: &Grid,
    requests: &[SymbolRequest],
    params: &PlacementParams,
    rng: &mut R,
) -> PlacementOutcome {
    let started = Instant::now();
    let mut best = place_codes(template.clone(), requests, params, rng);
    let mut origin_draws = best.stats.origin_draws;
    let mut passes = 1;

    while !best.failures.is_empty() && passes < params.grid_attempts {
        let candidate = place_codes(template.clone(), requests, params, rng);
        passes += 1;
        origin_draws += candidate.stats.origin_draws;
        debug!(
            pass = passes,
            failed = candidate.failed_count(),
            best = best.failed_count(),
            "Retrying placement on a fresh grid"
        );
        if candidate.failed_count() < best.failed_count() {
            best = candidate;
        }
    }

    best.stats = PlacementStats {
        origin_draws,
        grid_attempts: passes,
        elapsed: started.elapsed(),
    };

    info!(
        requested = total_instances(requests),
        placed = best.placed_count(),
        failed = best.failed_count(),
        passes,
        origin_draws,
        elapsed_ms = best.stats.elapsed.as_millis() as u64,
        "Placed color codes"
    );
    best
}
