//! Static color code definitions
//!
//! A color code is a short run of colored cells the robot's sensor reads as a
//! command. The catalog is shared by every request and never mutated; request
//! quantities live in [`crate::quantity::SymbolRequest`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A printable cell color. Unpainted (white) cells carry no color at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Black,
}

/// Reserved color for padding cells and connective paths
pub const INK: Color = Color::Black;

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Black];

    /// Printer-calibrated hex value
    pub fn hex(self) -> &'static str {
        match self {
            Color::Red => "#EC2027",
            Color::Green => "#49B749",
            Color::Blue => "#1183C6",
            Color::Black => "#000000",
        }
    }

    /// Short label used in legends and text previews
    pub fn abbreviation(self) -> &'static str {
        match self {
            Color::Red => "R",
            Color::Green => "G",
            Color::Blue => "B",
            Color::Black => "BK",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Base difficulty a symbol is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }
}

/// An immutable color code definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub name: &'static str,
    /// Colors in reading order; one cell per color
    pub colors: &'static [Color],
    pub levels: &'static [Level],
}

impl Symbol {
    /// Number of cells the color sequence covers
    pub fn footprint(&self) -> usize {
        self.colors.len()
    }

    pub fn is_available_at(&self, level: Level) -> bool {
        self.levels.contains(&level)
    }
}

impl Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Symbol", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("colors", self.colors)?;
        state.serialize_field("levels", self.levels)?;
        state.end()
    }
}

const ALL_LEVELS: &[Level] = &[Level::Easy, Level::Medium, Level::Hard];
const MEDIUM_UP: &[Level] = &[Level::Medium, Level::Hard];
const HARD_ONLY: &[Level] = &[Level::Hard];

pub const CATALOG: &[Symbol] = &[
    Symbol {
        name: "Left at Intersection",
        colors: &[Color::Green, Color::Black, Color::Red],
        levels: ALL_LEVELS,
    },
    Symbol {
        name: "Straight at Intersection",
        colors: &[Color::Blue, Color::Black, Color::Red],
        levels: ALL_LEVELS,
    },
    Symbol {
        name: "Right at Intersection",
        colors: &[Color::Blue, Color::Red, Color::Green],
        levels: ALL_LEVELS,
    },
    Symbol {
        name: "Line Switch Left",
        colors: &[Color::Green, Color::Red, Color::Green],
        levels: MEDIUM_UP,
    },
    Symbol {
        name: "Line Switch Straight",
        colors: &[Color::Green, Color::Blue, Color::Green],
        levels: MEDIUM_UP,
    },
    Symbol {
        name: "Line Switch Right",
        colors: &[Color::Red, Color::Green, Color::Red],
        levels: MEDIUM_UP,
    },
    Symbol {
        name: "U-Turn",
        colors: &[Color::Blue, Color::Red, Color::Blue],
        levels: HARD_ONLY,
    },
    Symbol {
        name: "U-Turn (line end)",
        colors: &[Color::Blue, Color::Red],
        levels: HARD_ONLY,
    },
];

pub fn symbol_by_name(name: &str) -> Option<&'static Symbol> {
    let trimmed = name.trim();
    CATALOG
        .iter()
        .find(|symbol| symbol.name.eq_ignore_ascii_case(trimmed))
}

/// Symbols usable at `level`, in catalog order
pub fn symbols_for_level(level: Level) -> impl Iterator<Item = &'static Symbol> {
    CATALOG
        .iter()
        .filter(move |symbol| symbol.is_available_at(level))
}

/// Catalog names within a small edit distance of `target`, closest first
pub fn suggest_symbols(target: &str) -> Vec<String> {
    let target = target.trim().to_lowercase();
    let mut candidates: Vec<(&str, usize)> = CATALOG
        .iter()
        .filter_map(|symbol| {
            let dist = levenshtein_distance(&symbol.name.to_lowercase(), &target);
            if dist <= 3 {
                Some((symbol.name, dist))
            } else {
                None
            }
        })
        .collect();

    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_footprints() {
        assert_eq!(CATALOG.len(), 8);
        for symbol in CATALOG {
            assert!((1..=3).contains(&symbol.footprint()), "{}", symbol.name);
            assert!(!symbol.levels.is_empty());
        }
    }

    #[test]
    fn test_catalog_names_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_symbols_for_level() {
        assert_eq!(symbols_for_level(Level::Easy).count(), 3);
        assert_eq!(symbols_for_level(Level::Medium).count(), 6);
        assert_eq!(symbols_for_level(Level::Hard).count(), 8);
    }

    #[test]
    fn test_symbol_by_name_ignores_case() {
        let symbol = symbol_by_name("  u-turn ").unwrap();
        assert_eq!(symbol.name, "U-Turn");
        assert!(symbol_by_name("Spin").is_none());
    }

    #[test]
    fn test_suggest_symbols() {
        let suggestions = suggest_symbols("U-Trun");
        assert_eq!(suggestions.first().map(String::as_str), Some("U-Turn"));
        assert!(suggest_symbols("completely different").is_empty());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_color_tables() {
        assert_eq!(Color::Red.hex(), "#EC2027");
        assert_eq!(Color::Black.abbreviation(), "BK");
        assert_eq!(INK, Color::Black);
        assert_eq!(Color::Blue.to_string(), "blue");
    }
}
