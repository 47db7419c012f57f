//! Error taxonomy for configuration and overlay construction.
//!
//! Routing non-convergence is deliberately absent: an absent target key is a
//! normal routing outcome reported as a result value, never an error.

use crate::NodeKey;

/// Rejected run parameters. Fatal, surfaced before any overlay is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Membership vector base must be at least 2.
    #[error("membership vector base must be >= 2, got {0}")]
    InvalidBase(u8),

    /// Membership vector length must be at least 1.
    #[error("membership vector length must be >= 1, got {0}")]
    InvalidLevels(usize),

    /// A population needs at least one node.
    #[error("population size must be >= 1, got {0}")]
    InvalidPopulation(usize),
}

/// Overlay construction failures.
///
/// Construction aborts atomically on any of these; no partially linked
/// overlay is ever returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Invalid shared parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two supplied identities share a key.
    #[error("duplicate node key {key}")]
    DuplicateKey {
        /// The key that appeared more than once.
        key: NodeKey,
    },

    /// A membership vector's length differs from the configured one.
    #[error("membership vector length {actual} does not match configured length {expected}")]
    VectorLengthMismatch {
        /// Configured vector length.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },
}
