//! Difficulty tiers and per-request instance counts
//!
//! A tier selects which catalog symbols are eligible (through its base
//! [`Level`]) and the closed range each symbol's instance count is drawn from.
//! The ranges are a configuration table, not a formula.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{self, Level, Symbol};
use crate::error::ConfigError;

/// Ordered difficulty tiers, easiest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    EasyLow,
    Easy,
    EasyMedium,
    Medium,
    MediumHard,
    Hard,
    HardHigh,
    HardSuper,
    HardExtreme,
}

impl Tier {
    pub const ALL: [Tier; 9] = [
        Tier::EasyLow,
        Tier::Easy,
        Tier::EasyMedium,
        Tier::Medium,
        Tier::MediumHard,
        Tier::Hard,
        Tier::HardHigh,
        Tier::HardSuper,
        Tier::HardExtreme,
    ];

    /// The base level named by the tier's first word
    pub fn level(self) -> Level {
        match self {
            Tier::EasyLow | Tier::Easy | Tier::EasyMedium => Level::Easy,
            Tier::Medium | Tier::MediumHard => Level::Medium,
            Tier::Hard | Tier::HardHigh | Tier::HardSuper | Tier::HardExtreme => Level::Hard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::EasyLow => "easy-low",
            Tier::Easy => "easy",
            Tier::EasyMedium => "easy-medium",
            Tier::Medium => "medium",
            Tier::MediumHard => "medium-hard",
            Tier::Hard => "hard",
            Tier::HardHigh => "hard-high",
            Tier::HardSuper => "hard-super",
            Tier::HardExtreme => "hard-extreme",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownTier(trimmed.to_string()))
    }
}

/// Requested difficulty for one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difficulty {
    Tier(Tier),
    /// Explicit symbol selection with an optional cap on total instances
    Custom {
        symbols: Vec<String>,
        max_total: Option<usize>,
    },
}

impl Difficulty {
    /// Build a difficulty from a name plus the custom-only options
    ///
    /// `"custom"` (any case) takes `symbols` and `max_total`; any other name
    /// must be a tier and must come without them.
    pub fn from_parts(
        name: &str,
        symbols: &[String],
        max_total: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if name.trim().eq_ignore_ascii_case("custom") {
            return Ok(Difficulty::Custom {
                symbols: symbols.to_vec(),
                max_total,
            });
        }

        let tier: Tier = name.parse()?;
        if !symbols.is_empty() {
            return Err(ConfigError::CustomOnlyOption("--symbol".to_string()));
        }
        if max_total.is_some() {
            return Err(ConfigError::CustomOnlyOption("--max-total".to_string()));
        }
        Ok(Difficulty::Tier(tier))
    }
}

impl From<Tier> for Difficulty {
    fn from(tier: Tier) -> Self {
        Difficulty::Tier(tier)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Tier(tier) => fmt::Display::fmt(tier, f),
            Difficulty::Custom { .. } => f.write_str("custom"),
        }
    }
}

/// Inclusive instance-count range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRange {
    pub min: u32,
    pub max: u32,
}

impl QuantityRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Reject zero bounds and inverted ranges; `label` names the table row
    pub fn validate(&self, label: &str) -> Result<(), ConfigError> {
        if self.min == 0 || self.max == 0 || self.min > self.max {
            return Err(ConfigError::invalid_range(label, self.min, self.max));
        }
        Ok(())
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min..=self.max) as usize
    }
}

/// Tier → quantity range configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantityTable {
    pub tiers: BTreeMap<Tier, QuantityRange>,
    pub custom: QuantityRange,
}

impl Default for QuantityTable {
    fn default() -> Self {
        let tiers = [
            (Tier::EasyLow, QuantityRange::new(1, 1)),
            (Tier::Easy, QuantityRange::new(1, 2)),
            (Tier::EasyMedium, QuantityRange::new(2, 4)),
            (Tier::Medium, QuantityRange::new(1, 2)),
            (Tier::MediumHard, QuantityRange::new(1, 3)),
            (Tier::Hard, QuantityRange::new(1, 2)),
            (Tier::HardHigh, QuantityRange::new(1, 3)),
            (Tier::HardSuper, QuantityRange::new(2, 4)),
            (Tier::HardExtreme, QuantityRange::new(2, 5)),
        ];
        Self {
            tiers: tiers.into_iter().collect(),
            custom: QuantityRange::new(1, 9),
        }
    }
}

impl QuantityTable {
    pub fn with_range(mut self, tier: Tier, range: QuantityRange) -> Self {
        self.tiers.insert(tier, range);
        self
    }

    pub fn with_custom_range(mut self, range: QuantityRange) -> Self {
        self.custom = range;
        self
    }

    /// Range for a tier; tiers missing from the table fall back to the default
    pub fn range(&self, tier: Tier) -> QuantityRange {
        self.tiers
            .get(&tier)
            .copied()
            .or_else(|| QuantityTable::default().tiers.get(&tier).copied())
            .unwrap_or(QuantityRange::new(1, 1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (tier, range) in &self.tiers {
            range.validate(tier.as_str())?;
        }
        self.custom.validate("custom")
    }
}

/// A symbol together with how many copies this request places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolRequest {
    pub symbol: Symbol,
    pub quantity: usize,
}

impl SymbolRequest {
    pub fn new(symbol: Symbol, quantity: usize) -> Self {
        Self { symbol, quantity }
    }
}

pub fn total_instances(requests: &[SymbolRequest]) -> usize {
    requests.iter().map(|r| r.quantity).sum()
}

/// Draw an instance count for every eligible symbol
///
/// Tiers take every catalog symbol available at the tier's level, in catalog
/// order. Custom difficulty takes the named symbols in the given order, draws
/// each from the custom range and then removes single instances from randomly
/// chosen symbols until the total fits `max_total`.
pub fn resolve_quantities<R: Rng>(
    difficulty: &Difficulty,
    table: &QuantityTable,
    rng: &mut R,
) -> Result<Vec<SymbolRequest>, ConfigError> {
    let requests = match difficulty {
        Difficulty::Tier(tier) => {
            let range = table.range(*tier);
            range.validate(tier.as_str())?;
            catalog::symbols_for_level(tier.level())
                .map(|symbol| SymbolRequest::new(*symbol, range.sample(rng)))
                .collect::<Vec<_>>()
        }
        Difficulty::Custom { symbols, max_total } => {
            table.custom.validate("custom")?;
            let mut requests = symbols
                .iter()
                .map(|name| {
                    catalog::symbol_by_name(name)
                        .map(|symbol| SymbolRequest::new(*symbol, table.custom.sample(rng)))
                        .ok_or_else(|| {
                            ConfigError::unknown_symbol(
                                name.trim(),
                                catalog::suggest_symbols(name),
                            )
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(cap) = max_total {
                trim_to_cap(&mut requests, *cap, rng);
            }
            requests
        }
    };

    debug!(
        difficulty = %difficulty,
        symbols = requests.len(),
        instances = total_instances(&requests),
        "Resolved color code quantities"
    );
    Ok(requests)
}

fn trim_to_cap<R: Rng>(requests: &mut [SymbolRequest], cap: usize, rng: &mut R) {
    let mut total = total_instances(requests);
    while total > cap {
        let candidates: Vec<usize> = requests
            .iter()
            .enumerate()
            .filter(|(_, r)| r.quantity > 0)
            .map(|(i, _)| i)
            .collect();
        let pick = candidates[rng.gen_range(0..candidates.len())];
        requests[pick].quantity -= 1;
        total -= 1;
    }
}
