//! Skip Graph Simulator CLI
//!
//! Builds a deterministic skip graph overlay and runs the configured
//! experiment against it. Single-threaded, reproducible when the same seed
//! is used.
//!
//! # Example
//!
//! ```bash
//! # Dump an 8-node topology built from a fixed seed
//! sgsim --exp basic -n 8 --seed 42
//!
//! # One unicast trial over 32 nodes with the original algorithm
//! sgsim --exp unicast -n 32 --unicast-algorithm original
//!
//! # Hop scaling across population sizes, as JSON
//! sgsim --exp unicast-vary-n --sizes 2,4,8,16,32,64 --json
//! ```

use clap::{Parser, ValueEnum};
use sgsim_simulation::{ExperimentConfig, ExperimentError, ExperimentHarness};
use sgsim_simulator::{print_sweep, print_topology, print_unicast};
use sgsim_types::{JoinMode, NodeKey, UnicastAlgorithm};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Which experiment to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Experiment {
    /// Build one overlay and dump its neighbor tables.
    Basic,
    /// Build one overlay and run a single unicast query.
    Unicast,
    /// Run unicast trials across a range of population sizes.
    UnicastVaryN,
}

/// Skip Graph Simulator
#[derive(Parser, Debug)]
#[command(name = "sgsim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Experiment to run
    #[arg(long, value_enum, default_value_t = Experiment::Unicast)]
    exp: Experiment,

    /// Number of nodes
    #[arg(short = 'n', long = "nodes", default_value = "8")]
    nodes: usize,

    /// Membership vector base
    #[arg(long, default_value = "2")]
    alpha: u8,

    /// Membership vector length. Derived from the population when omitted.
    #[arg(long)]
    levels: Option<usize>,

    /// Random seed for reproducible results. When omitted, a random seed is
    /// used and reported.
    #[arg(long)]
    seed: Option<u64>,

    /// Unicast routing algorithm (greedy or original)
    #[arg(long, default_value = "greedy")]
    unicast_algorithm: UnicastAlgorithm,

    /// Build the overlay in one pass instead of joining nodes one at a time
    #[arg(long)]
    fast_join: bool,

    /// Deepest level included in topology output. Full depth when omitted.
    #[arg(long)]
    output_topology_max_level: Option<usize>,

    /// Source key for the unicast trial. Random member when omitted.
    #[arg(long)]
    source: Option<u64>,

    /// Target key for the unicast trial. May be absent from the overlay.
    /// Random member's key when omitted.
    #[arg(long)]
    target: Option<u64>,

    /// Population sizes for the sweep
    #[arg(long, value_delimiter = ',', default_values_t = [2usize, 4, 8, 16, 32, 64, 128, 256])]
    sizes: Vec<usize>,

    /// Unicast trials per population size in the sweep
    #[arg(long, default_value = "10")]
    trials: usize,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "debug"
    } else {
        "warn,sgsim_simulator=info,sgsim_simulation=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(error) = run(args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ExperimentError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let join_mode = if args.fast_join {
        JoinMode::Batch
    } else {
        JoinMode::Incremental
    };

    info!(
        exp = ?args.exp,
        nodes = args.nodes,
        alpha = args.alpha,
        seed,
        %join_mode,
        algorithm = %args.unicast_algorithm,
        "starting simulation"
    );

    let mut config = ExperimentConfig::new(args.nodes)
        .with_base(args.alpha)
        .with_seed(seed)
        .with_join_mode(join_mode)
        .with_algorithm(args.unicast_algorithm);
    if let Some(levels) = args.levels {
        config = config.with_levels(levels);
    }

    let mut harness = ExperimentHarness::new(config)?;

    match args.exp {
        Experiment::Basic => {
            let report = harness.run_topology(args.output_topology_max_level)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
            } else {
                print_topology(&report);
            }
        }
        Experiment::Unicast => {
            let report = harness.run_unicast(
                args.source.map(NodeKey),
                args.target.map(NodeKey),
            )?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
            } else {
                print_unicast(&report);
            }
        }
        Experiment::UnicastVaryN => {
            let report = harness.run_sweep(&args.sizes, args.trials)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
            } else {
                print_sweep(&report);
            }
        }
    }

    Ok(())
}
