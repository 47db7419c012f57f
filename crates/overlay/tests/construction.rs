//! Construction properties that must hold across both build modes.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sgsim_overlay::{check_neighbor_tables, Overlay, Side};
use sgsim_types::{MembershipVector, NodeKey, OverlayParams};
use std::collections::HashSet;

/// Distinct random keys paired with random membership vectors, all drawn
/// from one seeded stream.
fn random_identities(
    seed: u64,
    n: usize,
    params: OverlayParams,
) -> Vec<(NodeKey, MembershipVector)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut keys = HashSet::new();
    let mut identities = Vec::with_capacity(n);
    while identities.len() < n {
        let key = NodeKey(rng.gen_range(0..10_000));
        if keys.insert(key) {
            let membership = MembershipVector::generate(&mut rng, params.levels, params.base);
            identities.push((key, membership));
        }
    }
    identities
}

#[test]
fn batch_construction_satisfies_neighbor_invariant() {
    for (seed, n, base, levels) in [(1u64, 8usize, 2u8, 4usize), (2, 17, 2, 6), (3, 25, 3, 4)] {
        let params = OverlayParams::new(base, levels).unwrap();
        let overlay = Overlay::build_batch(params, random_identities(seed, n, params)).unwrap();
        assert_eq!(check_neighbor_tables(&overlay), Ok(()), "seed {seed}");
    }
}

#[test]
fn incremental_construction_satisfies_neighbor_invariant() {
    for (seed, n, base, levels) in [(4u64, 8usize, 2u8, 4usize), (5, 17, 2, 6), (6, 25, 3, 4)] {
        let params = OverlayParams::new(base, levels).unwrap();
        let (overlay, stats) =
            Overlay::build_incremental(params, random_identities(seed, n, params)).unwrap();
        assert_eq!(check_neighbor_tables(&overlay), Ok(()), "seed {seed}");
        assert_eq!(stats.per_join_hops.len(), n);
        assert_eq!(stats.per_join_hops[0], 0, "first join pays nothing");
    }
}

#[test]
fn construction_modes_produce_identical_tables() {
    for seed in [7u64, 8, 9] {
        let params = OverlayParams::new(2, 5).unwrap();
        let identities = random_identities(seed, 20, params);

        let batch = Overlay::build_batch(params, identities.clone()).unwrap();
        let (incremental, _) = Overlay::build_incremental(params, identities).unwrap();

        assert_eq!(
            batch.snapshot(params.levels),
            incremental.snapshot(params.levels),
            "seed {seed}"
        );
    }
}

#[test]
fn join_order_does_not_change_the_result() {
    let params = OverlayParams::new(2, 4).unwrap();
    let identities = random_identities(10, 12, params);
    let reference = Overlay::build_batch(params, identities.clone()).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..5 {
        let mut shuffled = identities.clone();
        shuffled.shuffle(&mut rng);
        let (overlay, _) = Overlay::build_incremental(params, shuffled).unwrap();
        assert_eq!(overlay.snapshot(params.levels), reference.snapshot(params.levels));
    }
}

#[test]
fn groups_refine_monotonically() {
    let params = OverlayParams::new(2, 5).unwrap();
    let overlay = Overlay::build_batch(params, random_identities(12, 24, params)).unwrap();

    for (_, record) in overlay.iter() {
        for level in 0..params.levels {
            for side in [Side::Left, Side::Right] {
                // A neighbor one level up must still be a member of the
                // current level's group.
                if let Some(above) = record.neighbor(level + 1, side) {
                    let above = overlay.get(above).unwrap();
                    assert!(
                        record.membership().same_group_at(above.membership(), level),
                        "{} level {} {:?} neighbor {} escapes the coarser group",
                        record.key(),
                        level + 1,
                        side,
                        above.key()
                    );
                }
            }
        }
    }
}

#[test]
fn level_zero_ring_is_consistent_after_every_join() {
    let params = OverlayParams::new(2, 3).unwrap();
    let identities = vec![
        (NodeKey(40), MembershipVector::new(vec![0, 1, 0])),
        (NodeKey(10), MembershipVector::new(vec![1, 1, 0])),
        (NodeKey(30), MembershipVector::new(vec![0, 0, 1])),
        (NodeKey(50), MembershipVector::new(vec![1, 0, 1])),
        (NodeKey(20), MembershipVector::new(vec![0, 1, 1])),
    ];

    // Construction is deterministic in join order, so the overlay after
    // joining a prefix of the list is exactly the overlay mid-build.
    for joined in 1..=identities.len() {
        let (overlay, _) =
            Overlay::build_incremental(params, identities[..joined].to_vec()).unwrap();

        let mut sorted: Vec<NodeKey> = identities[..joined].iter().map(|(k, _)| *k).collect();
        sorted.sort();

        // Walk the level-0 ring left to right and compare with key order.
        let mut walked = Vec::with_capacity(joined);
        let mut cursor = overlay.min_index();
        while let Some(index) = cursor {
            let record = overlay.get(index).unwrap();
            walked.push(record.key());
            cursor = record.right(0);
        }
        assert_eq!(walked, sorted, "after {joined} joins");

        // Open ring: no LEFT below the minimum, no RIGHT above the maximum.
        let min = overlay.min_index().unwrap();
        let max = overlay.max_index().unwrap();
        assert_eq!(overlay.get(min).unwrap().left(0), None);
        assert_eq!(overlay.get(max).unwrap().right(0), None);
    }
}

#[test]
fn snapshot_lists_nodes_in_key_order() {
    let params = OverlayParams::new(2, 3).unwrap();
    let overlay = Overlay::build_batch(params, random_identities(13, 9, params)).unwrap();
    let snapshot = overlay.snapshot(1);

    assert_eq!(snapshot.max_level, 1);
    assert_eq!(snapshot.nodes.len(), 9);
    for pair in snapshot.nodes.windows(2) {
        assert!(pair[0].key < pair[1].key);
    }
    for node in &snapshot.nodes {
        assert_eq!(node.levels.len(), 2);
    }
}
