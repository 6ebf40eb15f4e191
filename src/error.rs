//! Error types for sheet generation
//!
//! Only structurally invalid input is an error. Instances that cannot be
//! placed and connections that cannot be routed are reported as data on the
//! generated sheet instead.

use thiserror::Error;

/// Invalid configuration that aborts a generation request
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Paper size name that has no dimensions table entry
    #[error("unsupported paper size '{0}' (expected one of: A4, A3, Letter, Legal)")]
    UnsupportedPaperSize(String),

    /// Cell edge length that is zero, negative or not a number
    #[error("invalid cell size {0} mm: must be a positive number")]
    InvalidCellSize(f64),

    /// Grid with no rows or no columns
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    /// Quantity range with a zero bound or `min > max`
    #[error("invalid quantity range for {tier}: {min}..={max}")]
    InvalidQuantityRange { tier: String, min: u32, max: u32 },

    /// Symbol name not present in the catalog
    #[error("unknown color code '{name}'")]
    UnknownSymbol {
        name: String,
        suggestions: Vec<String>,
    },

    /// Symbol whose color sequence cannot be placed
    #[error("invalid color code '{name}': {reason}")]
    InvalidSymbol { name: String, reason: String },

    /// Placement parameters that would make every attempt meaningless
    #[error("invalid placement configuration: {0}")]
    InvalidPlacement(String),

    /// Difficulty tier name that does not exist
    #[error("unknown difficulty '{0}'")]
    UnknownTier(String),

    /// Custom-difficulty option given alongside a named tier
    #[error("{0} only applies to the custom difficulty")]
    CustomOnlyOption(String),

    /// Activity name that does not exist
    #[error("unknown activity '{0}'")]
    UnknownActivity(String),
}

impl ConfigError {
    /// Create an unknown symbol error with suggestions
    pub fn unknown_symbol(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownSymbol {
            name: name.into(),
            suggestions,
        }
    }

    /// Create an invalid quantity range error
    pub fn invalid_range(tier: impl Into<String>, min: u32, max: u32) -> Self {
        Self::InvalidQuantityRange {
            tier: tier.into(),
            min,
            max,
        }
    }

    /// Create an invalid symbol error
    pub fn invalid_symbol(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSymbol {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid placement configuration error
    pub fn invalid_placement(reason: impl Into<String>) -> Self {
        Self::InvalidPlacement(reason.into())
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownSymbol { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_symbol_display() {
        let err = ConfigError::unknown_symbol("U-Trun", vec!["U-Turn".to_string()]);
        assert!(err.to_string().contains("U-Trun"));
        assert_eq!(err.suggestions(), Some(&["U-Turn".to_string()][..]));
    }

    #[test]
    fn test_invalid_range_display() {
        let err = ConfigError::invalid_range("easy", 3, 1);
        assert_eq!(err.to_string(), "invalid quantity range for easy: 3..=1");
    }

    #[test]
    fn test_empty_grid_display() {
        let err = ConfigError::EmptyGrid { rows: 0, cols: 4 };
        assert!(err.to_string().contains("0x4"));
        assert_eq!(err.suggestions(), None);
    }
}
