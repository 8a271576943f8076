//! Engine configuration
//!
//! - [`ChangelogOptions`]: per-request changelog settings
//! - [`TierTable`]: ordered tier definitions, loadable from TOML or JSON
//! - [`CacheConfig`]: bounds for caller-owned caches

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{RanklogError, Result};
use crate::model::ChangelogMode;

/// Options for one changelog request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangelogOptions {
    #[serde(default)]
    pub mode: ChangelogMode,
}

impl ChangelogOptions {
    pub fn with_mode(mode: ChangelogMode) -> Self {
        Self { mode }
    }
}

/// One tier: a named band covering `percent` of the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDef {
    pub name: String,
    pub percent: f64,
}

impl TierDef {
    pub fn new(name: impl Into<String>, percent: f64) -> Self {
        Self {
            name: name.into(),
            percent,
        }
    }
}

/// Tolerance when checking that percentages do not exceed 100
const PERCENT_EPSILON: f64 = 1e-6;

/// Ordered tier definitions, best tier first
///
/// TOML form:
///
/// ```toml
/// [[tiers]]
/// name = "Top"
/// percent = 10
///
/// [[tiers]]
/// name = "Rest"
/// percent = 90
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub tiers: Vec<TierDef>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                TierDef::new("Legendary", 5.0),
                TierDef::new("Mythic", 10.0),
                TierDef::new("Epic", 15.0),
                TierDef::new("Rare", 20.0),
                TierDef::new("Uncommon", 25.0),
                TierDef::new("Common", 25.0),
            ],
        }
    }
}

impl TierTable {
    /// Build and validate a table
    ///
    /// # Errors
    ///
    /// `InvalidTierTable` if the table is empty, any percent is not a finite
    /// positive number, or the percentages sum above 100.
    pub fn new(tiers: Vec<TierDef>) -> Result<Self> {
        let table = Self { tiers };
        table.validate()?;
        Ok(table)
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed TOML, `InvalidTierTable` for a table
    /// that fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: TierTable = toml::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed JSON, `InvalidTierTable` for a table
    /// that fails validation.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let table: TierTable = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Check the table invariants
    ///
    /// # Errors
    ///
    /// `InvalidTierTable` describing the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(RanklogError::InvalidTierTable {
                reason: "at least one tier is required".to_string(),
            });
        }
        for tier in &self.tiers {
            if !tier.percent.is_finite() || tier.percent <= 0.0 {
                return Err(RanklogError::InvalidTierTable {
                    reason: format!("tier `{}` has invalid percent {}", tier.name, tier.percent),
                });
            }
        }
        let sum: f64 = self.tiers.iter().map(|t| t.percent).sum();
        if sum > 100.0 + PERCENT_EPSILON {
            return Err(RanklogError::InvalidTierTable {
                reason: format!("percentages sum to {} (more than 100)", sum),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TierDef> {
        self.tiers.get(index)
    }
}

/// Bounds for a caller-owned cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum live entries; least recently used entries are evicted first
    pub max_entries: usize,
    /// Entries older than this are treated as misses
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 16,
            ttl: None,
        }
    }
}
