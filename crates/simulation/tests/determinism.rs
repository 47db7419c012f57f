//! Tests for deterministic experiments.
//!
//! These verify that a configuration plus a seed fully determines every
//! report the harness produces, which is the property that makes runs
//! replayable, plus the concrete small-population scenarios that pin down
//! the construction contract.

use sgsim_simulation::{ExperimentConfig, ExperimentHarness};
use sgsim_types::{JoinMode, NodeKey, UnicastAlgorithm};

fn harness(config: ExperimentConfig) -> ExperimentHarness {
    ExperimentHarness::new(config).expect("valid test config")
}

#[test]
fn same_seed_produces_identical_unicast_reports() {
    let config = ExperimentConfig::new(32).with_seed(12345);

    let first = harness(config.clone()).run_unicast(None, None).unwrap();
    let second = harness(config).run_unicast(None, None).unwrap();

    assert_eq!(first, second);
}

#[test]
fn same_seed_produces_identical_sweeps() {
    let config = ExperimentConfig::new(8)
        .with_seed(777)
        .with_algorithm(UnicastAlgorithm::Original);

    let sizes = [4usize, 8, 16];
    let first = harness(config.clone()).run_sweep(&sizes, 5).unwrap();
    let second = harness(config).run_sweep(&sizes, 5).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.points.len(), 3);
    for point in &first.points {
        assert_eq!(point.hops.len(), 5);
    }
}

#[test]
fn construction_mode_does_not_change_the_topology() {
    let batch = harness(ExperimentConfig::new(16).with_seed(9))
        .run_topology(None)
        .unwrap();
    let incremental = harness(
        ExperimentConfig::new(16)
            .with_seed(9)
            .with_join_mode(JoinMode::Incremental),
    )
    .run_topology(None)
    .unwrap();

    assert_eq!(batch.snapshot, incremental.snapshot);
    assert!(batch.join_stats.is_none());
    let stats = incremental.join_stats.expect("incremental mode reports join costs");
    assert_eq!(stats.per_join_hops.len(), 16);
}

#[test]
fn reports_echo_the_seed_for_replay() {
    let report = harness(ExperimentConfig::new(8).with_seed(4242))
        .run_unicast(None, None)
        .unwrap();
    assert_eq!(report.seed, 4242);
    assert_eq!(report.n, 8);
}

/// N=8, base=2, derived L=4, seed=42, batch construction: the level-0 ring
/// must be exactly the eight keys in ascending order, open at both ends.
#[test]
fn eight_node_level_zero_ring_is_the_sorted_key_sequence() {
    let report = harness(ExperimentConfig::new(8).with_seed(42))
        .run_topology(None)
        .unwrap();

    assert_eq!(report.levels, 4);
    let nodes = &report.snapshot.nodes;
    assert_eq!(nodes.len(), 8);

    for (position, node) in nodes.iter().enumerate() {
        let expected_left = position.checked_sub(1).map(|p| nodes[p].key);
        let expected_right = nodes.get(position + 1).map(|n| n.key);
        assert_eq!(node.levels[0].left, expected_left, "{}", node.key);
        assert_eq!(node.levels[0].right, expected_right, "{}", node.key);
    }
}

/// Same scenario, routed: greedy from the minimum-key node must reach the
/// maximum key.
#[test]
fn eight_node_greedy_reaches_the_maximum_from_the_minimum() {
    let topology = harness(ExperimentConfig::new(8).with_seed(42))
        .run_topology(None)
        .unwrap();
    let min = topology.snapshot.nodes.first().unwrap().key;
    let max = topology.snapshot.nodes.last().unwrap().key;

    let report = harness(ExperimentConfig::new(8).with_seed(42))
        .run_unicast(Some(min), Some(max))
        .unwrap();

    assert!(report.reached);
    assert_eq!(report.path.first(), Some(&min));
    assert_eq!(report.path.last(), Some(&max));
    assert!(report.hops < 8, "took {} hops", report.hops);
}

#[test]
fn absent_target_is_a_result_not_an_error() {
    let report = harness(ExperimentConfig::new(8).with_seed(3))
        .run_unicast(None, Some(NodeKey::MAX))
        .unwrap();

    assert!(!report.reached);
    assert!(report.path.len() == report.hops + 1);
}

#[test]
fn reports_serialize_for_the_plotting_layer() {
    let report = harness(ExperimentConfig::new(8).with_seed(5))
        .run_unicast(None, None)
        .unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["n"], 8);
    assert_eq!(value["seed"], 5);
    assert_eq!(value["algorithm"], "greedy");
    assert!(value["path"].is_array());
}
