//! Shared overlay parameters and run modes.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parameters fixed for the lifetime of one overlay instance.
///
/// Every node in an overlay shares the same membership vector base and
/// length; vectors from different parameter sets must never be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayParams {
    /// Membership vector base. Each digit is drawn from `0..base`.
    pub base: u8,

    /// Membership vector length. Neighbor tables hold levels `0..=levels`,
    /// where level 0 is the whole-population ring and level `levels`
    /// requires a full vector match.
    pub levels: usize,
}

impl OverlayParams {
    /// Create a validated parameter set.
    pub fn new(base: u8, levels: usize) -> Result<Self, ConfigError> {
        let params = Self { base, levels };
        params.validate()?;
        Ok(params)
    }

    /// Validate the parameter invariants (`base >= 2`, `levels >= 1`).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base < 2 {
            return Err(ConfigError::InvalidBase(self.base));
        }
        if self.levels < 1 {
            return Err(ConfigError::InvalidLevels(self.levels));
        }
        Ok(())
    }

    /// Vector length that keeps expected top-level groups near a single
    /// node for the given population: the smallest `L` with
    /// `base^L >= population`, plus one spare level.
    pub fn derive_levels(base: u8, population: usize) -> usize {
        let mut levels = 0usize;
        let mut span = 1usize;
        while span < population {
            span = span.saturating_mul(base as usize);
            levels += 1;
        }
        levels + 1
    }

    /// Number of neighbor-table entries per node (`levels + 1`).
    pub fn table_len(&self) -> usize {
        self.levels + 1
    }
}

/// How an overlay gets constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// All identities are known up front and the neighbor tables are
    /// materialized in one global pass. No join cost is measured.
    Batch,

    /// Nodes join one at a time through an existing member, each paying a
    /// realistic traversal cost that the builder reports.
    Incremental,
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinMode::Batch => write!(f, "batch"),
            JoinMode::Incremental => write!(f, "incremental"),
        }
    }
}

impl FromStr for JoinMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "batch" => Ok(JoinMode::Batch),
            "incremental" => Ok(JoinMode::Incremental),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Which unicast search strategy the router runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnicastAlgorithm {
    /// Compare candidates across all levels at every hop and take the one
    /// closest to the target. Fewest hops, widest per-hop comparison.
    Greedy,

    /// Exhaust the current level before dropping one level down. More hops,
    /// cheaper per-hop decision.
    Original,
}

impl fmt::Display for UnicastAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnicastAlgorithm::Greedy => write!(f, "greedy"),
            UnicastAlgorithm::Original => write!(f, "original"),
        }
    }
}

impl FromStr for UnicastAlgorithm {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(UnicastAlgorithm::Greedy),
            "original" => Ok(UnicastAlgorithm::Original),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Unrecognized mode or algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized mode {0:?}")]
pub struct ParseModeError(pub String);
