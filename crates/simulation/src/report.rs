//! Serializable experiment reports.
//!
//! These are the values handed to the external reporting/plotting layer.
//! Every report carries the full parameter set including the resolved seed,
//! so any run can be replayed from its own output.

use crate::stats::HopStats;
use serde::Serialize;
use sgsim_overlay::{JoinStats, TopologySnapshot};
use sgsim_types::{JoinMode, NodeKey, UnicastAlgorithm};

/// Result of a topology-dump experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyReport {
    /// Population size.
    pub n: usize,
    /// Membership vector base.
    pub base: u8,
    /// Membership vector length actually used.
    pub levels: usize,
    /// Seed the run used.
    pub seed: u64,
    /// Construction mode.
    pub join_mode: JoinMode,
    /// Neighbor tables up to the requested level.
    pub snapshot: TopologySnapshot,
    /// Per-join traversal costs; present for incremental construction only.
    pub join_stats: Option<JoinStats>,
}

/// Result of a single unicast trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnicastReport {
    /// Population size.
    pub n: usize,
    /// Membership vector base.
    pub base: u8,
    /// Membership vector length actually used.
    pub levels: usize,
    /// Seed the run used.
    pub seed: u64,
    /// Construction mode.
    pub join_mode: JoinMode,
    /// Routing algorithm the trial ran.
    pub algorithm: UnicastAlgorithm,
    /// Key of the node the query started from.
    pub source: NodeKey,
    /// Key the query searched for.
    pub target: NodeKey,
    /// Whether a node holding the target key was found.
    pub reached: bool,
    /// Number of hops taken.
    pub hops: usize,
    /// Keys visited in order, source first.
    pub path: Vec<NodeKey>,
    /// Per-join traversal costs; present for incremental construction only.
    pub join_stats: Option<JoinStats>,
}

/// Result of a unicast sweep across population sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    /// Membership vector base.
    pub base: u8,
    /// Seed the run used.
    pub seed: u64,
    /// Construction mode.
    pub join_mode: JoinMode,
    /// Routing algorithm every trial ran.
    pub algorithm: UnicastAlgorithm,
    /// Trials run per population size.
    pub trials: usize,
    /// One entry per population size, in sweep order.
    pub points: Vec<SweepPoint>,
}

/// Hop distribution for one population size of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Population size of this point.
    pub n: usize,
    /// Membership vector length used at this size.
    pub levels: usize,
    /// Hop-count distribution over the point's trials.
    pub hops: HopStats,
}
