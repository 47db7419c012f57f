//! Human-readable report rendering.

use sgsim_simulation::{SweepReport, TopologyReport, UnicastReport};
use sgsim_types::NodeKey;

fn fmt_link(link: Option<NodeKey>) -> String {
    match link {
        Some(key) => key.to_string(),
        None => "-".to_string(),
    }
}

/// Print a topology dump: one block per node, one line per level.
pub fn print_topology(report: &TopologyReport) {
    println!("\nSkip Graph Topology");
    println!("===================\n");
    println!(
        "nodes: {}  base: {}  levels: {}  join mode: {}  seed: {}\n",
        report.n, report.base, report.levels, report.join_mode, report.seed
    );

    for node in &report.snapshot.nodes {
        println!("node[{}] (mv={})", node.key, node.membership);
        for level in &node.levels {
            println!(
                "  level {}: LEFT={} RIGHT={}",
                level.level,
                fmt_link(level.left),
                fmt_link(level.right)
            );
        }
    }

    if let Some(stats) = &report.join_stats {
        println!(
            "\njoin cost: {} hops total, {:.2} mean per join",
            stats.total_hops(),
            stats.mean_hops()
        );
    }
}

/// Print a single unicast trial: parameters, the full path, and the hop
/// count.
pub fn print_unicast(report: &UnicastReport) {
    println!("\nUnicast Trial");
    println!("=============\n");
    println!(
        "nodes: {}  base: {}  levels: {}  join mode: {}  algorithm: {}  seed: {}",
        report.n, report.base, report.levels, report.join_mode, report.algorithm, report.seed
    );
    println!("source: {}  target: {}", report.source, report.target);

    let rendered: Vec<String> = report.path.iter().map(|key| key.to_string()).collect();
    println!("path: {}", rendered.join(" -> "));

    if report.reached {
        println!("hops: {} (target reached)", report.hops);
    } else {
        println!(
            "hops: {} (target absent; stopped at closest node {})",
            report.hops,
            report.path.last().map(|k| k.to_string()).unwrap_or_default()
        );
    }

    if let Some(stats) = &report.join_stats {
        println!(
            "join cost: {} hops total, {:.2} mean per join",
            stats.total_hops(),
            stats.mean_hops()
        );
    }
}

/// Print a sweep as a table of hop statistics per population size.
pub fn print_sweep(report: &SweepReport) {
    println!("\nUnicast Sweep");
    println!("=============\n");
    println!(
        "base: {}  join mode: {}  algorithm: {}  trials per size: {}  seed: {}\n",
        report.base, report.join_mode, report.algorithm, report.trials, report.seed
    );

    println!("{:>8} {:>8} {:>8} {:>8} {:>8}", "n", "levels", "min", "mean", "max");
    for point in &report.points {
        println!(
            "{:>8} {:>8} {:>8} {:>8.2} {:>8}",
            point.n,
            point.levels,
            point.hops.min().unwrap_or(0),
            point.hops.mean(),
            point.hops.max().unwrap_or(0)
        );
    }
}
