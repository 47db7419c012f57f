//! The experiment harness.

use crate::config::ExperimentConfig;
use crate::population::generate_identities;
use crate::report::{SweepPoint, SweepReport, TopologyReport, UnicastReport};
use crate::stats::HopStats;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sgsim_overlay::{JoinStats, NodeIndex, Overlay};
use sgsim_routing::route;
use sgsim_types::{BuildError, ConfigError, NodeKey};
use tracing::{debug, info};

/// Errors surfaced by the harness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExperimentError {
    /// Invalid run parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Overlay construction failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A caller-specified source key is not a member of the overlay.
    #[error("source key {key} is not in the overlay")]
    UnknownSource {
        /// The missing key.
        key: NodeKey,
    },
}

/// Drives overlay construction and routing for the configured scenarios.
///
/// The harness owns the run's single RNG stream: population generation and
/// trial selection all draw from it, so one (config, seed) pair replays a
/// run exactly. Construction always finishes before the first query runs;
/// the router only ever sees a finished overlay by shared reference.
///
/// Each `run_*` call consumes more of the stream. To reproduce a scenario,
/// run it on a fresh harness rather than after other scenarios.
pub struct ExperimentHarness {
    config: ExperimentConfig,
    rng: ChaCha8Rng,
}

impl ExperimentHarness {
    /// Create a harness, validating the configured parameters up front.
    pub fn new(config: ExperimentConfig) -> Result<Self, ConfigError> {
        config.overlay_params()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        info!(
            n = config.n,
            base = config.base,
            seed = config.seed,
            join_mode = %config.join_mode,
            algorithm = %config.algorithm,
            "created experiment harness"
        );
        Ok(Self { config, rng })
    }

    /// The configuration this harness runs.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Build one overlay and export its neighbor tables.
    ///
    /// `max_level` bounds the exported depth; `None` exports the full
    /// table.
    pub fn run_topology(
        &mut self,
        max_level: Option<usize>,
    ) -> Result<TopologyReport, ExperimentError> {
        let (overlay, join_stats) = self.build_overlay(self.config.n)?;
        let levels = overlay.params().levels;
        let snapshot = overlay.snapshot(max_level.unwrap_or(levels));
        Ok(TopologyReport {
            n: self.config.n,
            base: self.config.base,
            levels,
            seed: self.config.seed,
            join_mode: self.config.join_mode,
            snapshot,
            join_stats,
        })
    }

    /// Build one overlay and run a single unicast query.
    ///
    /// An unspecified source falls back to a random member; an unspecified
    /// target falls back to a random member's key. A specified target may
    /// be absent from the overlay, in which case the query legitimately
    /// terminates on the closest reachable node.
    pub fn run_unicast(
        &mut self,
        source: Option<NodeKey>,
        target: Option<NodeKey>,
    ) -> Result<UnicastReport, ExperimentError> {
        let (overlay, join_stats) = self.build_overlay(self.config.n)?;

        let source_index = match source {
            Some(key) => overlay
                .index_of(key)
                .ok_or(ExperimentError::UnknownSource { key })?,
            None => self.random_member(&overlay),
        };
        let target_key = match target {
            Some(key) => key,
            None => {
                let index = self.random_member(&overlay);
                overlay[index].key()
            }
        };

        let outcome = route(&overlay, source_index, target_key, self.config.algorithm);
        debug!(
            source = %overlay[source_index].key(),
            target = %target_key,
            hops = outcome.hops(),
            reached = outcome.reached,
            "unicast trial finished"
        );

        Ok(UnicastReport {
            n: self.config.n,
            base: self.config.base,
            levels: overlay.params().levels,
            seed: self.config.seed,
            join_mode: self.config.join_mode,
            algorithm: self.config.algorithm,
            source: overlay[source_index].key(),
            target: target_key,
            reached: outcome.reached,
            hops: outcome.hops(),
            path: outcome.path,
            join_stats,
        })
    }

    /// Run `trials` unicast queries per population size, each size on a
    /// fresh overlay, and report the hop distribution per size.
    pub fn run_sweep(
        &mut self,
        sizes: &[usize],
        trials: usize,
    ) -> Result<SweepReport, ExperimentError> {
        let mut points = Vec::with_capacity(sizes.len());
        for &n in sizes {
            let (overlay, _) = self.build_overlay(n)?;
            let mut hops = HopStats::default();
            for _ in 0..trials {
                let source = self.random_member(&overlay);
                let target = overlay[self.random_member(&overlay)].key();
                hops.record(route(&overlay, source, target, self.config.algorithm).hops());
            }
            debug!(n, mean_hops = hops.mean(), "sweep point finished");
            points.push(SweepPoint {
                n,
                levels: overlay.params().levels,
                hops,
            });
        }

        Ok(SweepReport {
            base: self.config.base,
            seed: self.config.seed,
            join_mode: self.config.join_mode,
            algorithm: self.config.algorithm,
            trials,
            points,
        })
    }

    fn build_overlay(&mut self, n: usize) -> Result<(Overlay, Option<JoinStats>), ExperimentError> {
        let params = self.config.overlay_params_for(n)?;
        let identities = generate_identities(&mut self.rng, n, params);
        let (overlay, join_stats) = Overlay::build(params, identities, self.config.join_mode)?;
        debug!(
            n,
            levels = params.levels,
            join_mode = %self.config.join_mode,
            "overlay constructed"
        );
        Ok((overlay, join_stats))
    }

    fn random_member(&mut self, overlay: &Overlay) -> NodeIndex {
        self.rng.gen_range(0..overlay.len()) as NodeIndex
    }
}
