use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::RanklogError;

/// Changelog mode
///
/// Selects how the diff is computed and how verbose the rendering is:
/// - `Standard`: full diff, two neighbour context lines
/// - `Timeline`: additions/removals only, dated; rank moves are ignored
/// - `Dev`: full diff, a single neighbour context line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangelogMode {
    #[default]
    #[serde(rename = "")]
    Standard,
    Timeline,
    Dev,
}

impl ChangelogMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangelogMode::Standard => "",
            ChangelogMode::Timeline => "timeline",
            ChangelogMode::Dev => "dev",
        }
    }

    pub fn is_timeline(&self) -> bool {
        matches!(self, ChangelogMode::Timeline)
    }
}

impl FromStr for ChangelogMode {
    type Err = RanklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "standard" => Ok(ChangelogMode::Standard),
            "timeline" => Ok(ChangelogMode::Timeline),
            "dev" => Ok(ChangelogMode::Dev),
            other => Err(RanklogError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChangelogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
