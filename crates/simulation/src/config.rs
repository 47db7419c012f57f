//! Experiment configuration.

use serde::Serialize;
use sgsim_types::{ConfigError, JoinMode, OverlayParams, UnicastAlgorithm};

/// Parameters for one experiment run.
///
/// A config plus a seed fully determines every report the harness produces;
/// rerunning with the same values replays the run exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentConfig {
    /// Population size.
    pub n: usize,

    /// Membership vector base.
    pub base: u8,

    /// Membership vector length. Derived from the population when `None`.
    pub levels: Option<usize>,

    /// Seed for the run's single RNG stream.
    pub seed: u64,

    /// How the overlay gets constructed.
    pub join_mode: JoinMode,

    /// Which routing strategy unicast trials use.
    pub algorithm: UnicastAlgorithm,
}

impl ExperimentConfig {
    /// Create a config with the given population and defaults matching the
    /// common binary-base setup.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            base: 2,
            levels: None,
            seed: 0,
            join_mode: JoinMode::Batch,
            algorithm: UnicastAlgorithm::Greedy,
        }
    }

    /// Set the membership vector base.
    pub fn with_base(mut self, base: u8) -> Self {
        self.base = base;
        self
    }

    /// Fix the membership vector length instead of deriving it.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the construction mode.
    pub fn with_join_mode(mut self, join_mode: JoinMode) -> Self {
        self.join_mode = join_mode;
        self
    }

    /// Set the unicast routing algorithm.
    pub fn with_algorithm(mut self, algorithm: UnicastAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Resolve the overlay parameters for a population of `n`, deriving the
    /// vector length when it is not fixed.
    pub fn overlay_params_for(&self, n: usize) -> Result<OverlayParams, ConfigError> {
        if n < 1 {
            return Err(ConfigError::InvalidPopulation(n));
        }
        let levels = self
            .levels
            .unwrap_or_else(|| OverlayParams::derive_levels(self.base, n));
        OverlayParams::new(self.base, levels)
    }

    /// Resolve the overlay parameters for the configured population.
    pub fn overlay_params(&self) -> Result<OverlayParams, ConfigError> {
        self.overlay_params_for(self.n)
    }
}
