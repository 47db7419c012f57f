//! Deterministic population generation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use sgsim_types::{MembershipVector, NodeKey, OverlayParams};
use std::collections::HashSet;

/// Key space used when sampling identities for a population of `n`.
///
/// Wide enough that rejection sampling terminates quickly, small enough
/// that keys stay short and readable in output.
fn key_space(n: usize) -> u64 {
    (n as u64 * 10).max(1_000)
}

/// Draw `n` distinct keys and membership vectors from one seeded stream.
///
/// The returned order is the join order for incremental construction; it is
/// a function of the RNG state alone, so one seed reproduces both the
/// identities and the joins.
pub fn generate_identities(
    rng: &mut ChaCha8Rng,
    n: usize,
    params: OverlayParams,
) -> Vec<(NodeKey, MembershipVector)> {
    let space = key_space(n);
    let mut seen = HashSet::with_capacity(n);
    let mut identities = Vec::with_capacity(n);
    while identities.len() < n {
        let key = NodeKey(rng.gen_range(0..space));
        if seen.insert(key) {
            let membership = MembershipVector::generate(rng, params.levels, params.base);
            identities.push((key, membership));
        }
    }
    identities
}
