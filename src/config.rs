//! Generation configuration
//!
//! Everything here has a compiled-in default. The CLI may overlay a TOML
//! file; the library itself never touches the filesystem except through
//! [`GenerateConfig::from_file`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{PlacementConfig, RoutingConfig};
use crate::error::ConfigError;
use crate::quantity::QuantityTable;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the complete generation pipeline
///
/// ```toml
/// [placement]
/// code_gap_mm = 40.0
/// grid_attempts = 5
///
/// [routing]
/// first_axis = "columns"
///
/// [quantities.tiers]
/// hard-extreme = { min = 3, max = 6 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub placement: PlacementConfig,
    pub routing: RoutingConfig,
    pub quantities: QuantityTable,
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placement(mut self, config: PlacementConfig) -> Self {
        self.placement = config;
        self
    }

    pub fn with_routing(mut self, config: RoutingConfig) -> Self {
        self.routing = config;
        self
    }

    pub fn with_quantities(mut self, table: QuantityTable) -> Self {
        self.quantities = table;
        self
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a TOML document; missing sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Check the quantity table; placement values are checked when they are
    /// resolved against a cell size
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quantities.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Axis;
    use crate::quantity::{QuantityRange, Tier};

    #[test]
    fn test_empty_document_is_default() {
        let config = GenerateConfig::from_toml_str("").unwrap();
        assert_eq!(config, GenerateConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = GenerateConfig::from_toml_str(
            r#"
[placement]
code_gap_mm = 40.0
grid_attempts = 5

[routing]
first_axis = "columns"

[routing.manufacturing]
decoy_lines = 2

[quantities.tiers]
hard-extreme = { min = 3, max = 6 }
"#,
        )
        .unwrap();

        assert_eq!(config.placement.code_gap_mm, 40.0);
        assert_eq!(config.placement.grid_attempts, 5);
        assert_eq!(config.placement.padding_cells, 2);
        assert_eq!(config.routing.first_axis, Axis::Columns);
        assert_eq!(config.routing.manufacturing.decoy_lines, 2);
        assert_eq!(
            config.quantities.range(Tier::HardExtreme),
            QuantityRange::new(3, 6)
        );
        // Tiers absent from the file fall back to the built-in table
        assert_eq!(config.quantities.range(Tier::Easy), QuantityRange::new(1, 2));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = GenerateConfig::new().with_quantities(
            QuantityTable::default().with_range(Tier::Medium, QuantityRange::new(4, 2)),
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::invalid_range("medium", 4, 2))
        );
    }

    #[test]
    fn test_unknown_axis_is_parse_error() {
        let err = GenerateConfig::from_toml_str("[routing]\nfirst_axis = \"diagonal\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse(_)));
    }
}
