//! Print palette for color codes
//!
//! Maps color names to the concrete hex values used when a sheet is exported.
//! Printers and robots disagree on exact shades, so a palette can be loaded
//! from TOML to override the built-in values.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::Color;

/// Errors that can occur when loading or parsing palettes
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse palette TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Hex value for cells no code or path has painted
pub const WHITE_HEX: &str = "#ffffff";

/// A palette mapping color names to hex values
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Color name (`red`, `green`, `blue`, `black`, `white`) -> hex color
    pub colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Colors calibrated for the line-following robot's color sensor
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "robot"
description = "Sensor-calibrated code colors"

[colors]
red = "#EC2027"
green = "#49B749"
blue = "#1183C6"
black = "#000000"
white = "#ffffff"
"##;

impl Palette {
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;

        Ok(Palette {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed
                .colors
                .into_iter()
                .map(|(name, hex)| (name.to_ascii_lowercase(), hex))
                .collect(),
        })
    }

    /// Look up a color name in this palette only
    pub fn get(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(|s| s.as_str())
    }

    /// Hex value for a painted color, falling back to the built-in value
    pub fn resolve_color(&self, color: Color) -> String {
        self.get(color.name())
            .unwrap_or_else(|| color.hex())
            .to_string()
    }

    /// Hex value for a cell; `None` is white
    pub fn resolve(&self, color: Option<Color>) -> String {
        match color {
            Some(color) => self.resolve_color(color),
            None => self.get("white").unwrap_or(WHITE_HEX).to_string(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
