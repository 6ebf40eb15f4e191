//! Output formats for a generated sheet
//!
//! The text preview is meant for terminals and tests. The JSON document is
//! what a downstream renderer turns into a printable page.

use serde_json::{json, Value};

use crate::catalog::Color;
use crate::grid::{Coord, Grid};
use crate::palette::Palette;
use crate::Sheet;

fn cell_char(color: Option<Color>) -> char {
    match color {
        Some(Color::Red) => 'R',
        Some(Color::Green) => 'G',
        Some(Color::Blue) => 'B',
        Some(Color::Black) => 'K',
        None => '.',
    }
}

/// One line per grid row, one character per cell
///
/// `R`, `G`, `B` and `K` (ink) mark painted cells; `.` is white.
pub fn render_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    let mut current_row = 0;
    for (coord, cell) in grid.iter() {
        if coord.row != current_row {
            out.push('\n');
            current_row = coord.row;
        }
        out.push(cell_char(cell.color));
    }
    out.push('\n');
    out
}

/// Full sheet as a JSON document with palette-resolved colors
pub fn to_json(sheet: &Sheet, palette: &Palette) -> Value {
    let cells: Vec<Vec<String>> = (0..sheet.grid.rows())
        .map(|row| {
            (0..sheet.grid.cols())
                .map(|col| palette.resolve(sheet.grid.color_at(Coord::new(row, col))))
                .collect()
        })
        .collect();

    let legend: Vec<Value> = sheet
        .requests
        .iter()
        .map(|request| {
            json!({
                "name": request.symbol.name,
                "quantity": request.quantity,
                "colors": request
                    .symbol
                    .colors
                    .iter()
                    .map(|c| c.abbreviation())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "rows": sheet.grid.rows(),
        "cols": sheet.grid.cols(),
        "palette": palette.name,
        "palette_description": palette.description,
        "cells": cells,
        "placements": sheet.placed,
        "failures": sheet.failures,
        "routing": sheet.routing,
        "legend": legend,
        "stats": {
            "origin_draws": sheet.stats.origin_draws,
            "grid_attempts": sheet.stats.grid_attempts,
            "elapsed_ms": sheet.stats.elapsed.as_millis() as u64,
        },
    })
}
