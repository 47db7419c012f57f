//! Experiment harness for the skip graph simulator.
//!
//! This crate glues the overlay builder and the unicast router into the
//! three experiment scenarios the simulator runs:
//!
//! - **topology dump**: build one overlay and export its neighbor tables
//! - **unicast trial**: build one overlay, route one query, report the path
//! - **unicast sweep**: repeat trials across a range of population sizes
//!   and report the hop distribution per size
//!
//! # Determinism
//!
//! Everything random in a run (keys, membership vectors, join order,
//! trial endpoints) is drawn from one `ChaCha8Rng` seeded from the
//! configuration. Given the same config, every report is identical across
//! runs. The seed is echoed into every report so a run chosen by the
//! process can be replayed on demand.
//!
//! # Example
//!
//! ```ignore
//! use sgsim_simulation::{ExperimentConfig, ExperimentHarness};
//!
//! let config = ExperimentConfig::new(32).with_seed(42);
//! let mut harness = ExperimentHarness::new(config)?;
//! let report = harness.run_unicast(None, None)?;
//!
//! println!("{} hops: {:?}", report.hops, report.path);
//! ```

mod config;
mod harness;
mod population;
mod report;
mod stats;

pub use config::ExperimentConfig;
pub use harness::{ExperimentError, ExperimentHarness};
pub use population::generate_identities;
pub use report::{SweepPoint, SweepReport, TopologyReport, UnicastReport};
pub use stats::HopStats;
