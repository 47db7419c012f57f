//! Unicast routing over a built skip graph overlay.
//!
//! Both algorithms operate purely on per-node neighbor tables; no global
//! knowledge is consulted at any hop:
//!
//! - [`UnicastAlgorithm::Greedy`] compares candidates across every level at
//!   the current node and hops to the one closest to the target. Fewest
//!   hops, widest per-hop comparison.
//! - [`UnicastAlgorithm::Original`] exhausts the current level before
//!   dropping one level down and never compares across levels. Cheaper
//!   decisions, typically more hops.
//!
//! Every accepted hop strictly shrinks the key distance to the target, so a
//! query can never revisit a node and always terminates. Searching for a
//! key that is not in the overlay is a supported outcome, not an error: the
//! query ends on the closest reachable node and the result says so.

use serde::Serialize;
use sgsim_overlay::{NodeIndex, Overlay, Side};
use sgsim_types::{NodeKey, UnicastAlgorithm};
use tracing::trace;

/// The result of one unicast query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOutcome {
    /// Keys visited in order, source first.
    pub path: Vec<NodeKey>,
    /// Whether the final node holds the target key.
    pub reached: bool,
}

impl RouteOutcome {
    /// Number of node-to-node transitions taken.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The node the query ended on. For an absent target this is the
    /// closest reachable predecessor or successor.
    pub fn terminal(&self) -> NodeKey {
        *self.path.last().expect("path always holds the source")
    }
}

/// Route from `source` toward `target` with the chosen algorithm.
///
/// The overlay must be fully constructed; routing only reads neighbor
/// tables and never mutates them.
pub fn route(
    overlay: &Overlay,
    source: NodeIndex,
    target: NodeKey,
    algorithm: UnicastAlgorithm,
) -> RouteOutcome {
    match algorithm {
        UnicastAlgorithm::Greedy => route_greedy(overlay, source, target),
        UnicastAlgorithm::Original => route_original(overlay, source, target),
    }
}

fn route_greedy(overlay: &Overlay, source: NodeIndex, target: NodeKey) -> RouteOutcome {
    let mut current = source;
    let mut path = vec![overlay[current].key()];

    while overlay[current].key() != target {
        let Some((next, level)) = greedy_step(overlay, current, target) else {
            break;
        };
        trace!(
            from = %overlay[current].key(),
            to = %overlay[next].key(),
            level,
            "greedy hop"
        );
        current = next;
        path.push(overlay[current].key());
    }

    let reached = overlay[current].key() == target;
    RouteOutcome { path, reached }
}

/// Among every level's neighbors that move toward `target` without passing
/// it, pick the one closest to the target.
///
/// Levels are scanned top down and a candidate replaces the best only when
/// strictly closer, so ties resolve to the highest level deterministically.
fn greedy_step(
    overlay: &Overlay,
    current: NodeIndex,
    target: NodeKey,
) -> Option<(NodeIndex, usize)> {
    let current_key = overlay[current].key();
    let mut best: Option<(NodeIndex, usize, u64)> = None;

    for level in (0..=overlay.params().levels).rev() {
        for side in [Side::Left, Side::Right] {
            let Some(candidate) = overlay[current].neighbor(level, side) else {
                continue;
            };
            let key = overlay[candidate].key();
            if !advances(current_key, key, target) {
                continue;
            }
            let distance = key.distance(target);
            if best.map_or(true, |(_, _, best_distance)| distance < best_distance) {
                best = Some((candidate, level, distance));
            }
        }
    }

    best.map(|(index, level, _)| (index, level))
}

fn route_original(overlay: &Overlay, source: NodeIndex, target: NodeKey) -> RouteOutcome {
    let mut current = source;
    let mut path = vec![overlay[current].key()];
    let mut level = overlay.params().levels;

    loop {
        let current_key = overlay[current].key();
        if current_key == target {
            break;
        }
        let side = if target > current_key {
            Side::Right
        } else {
            Side::Left
        };
        let step = overlay[current]
            .neighbor(level, side)
            .filter(|&next| advances(current_key, overlay[next].key(), target));
        match step {
            Some(next) => {
                trace!(
                    from = %current_key,
                    to = %overlay[next].key(),
                    level,
                    "level hop"
                );
                current = next;
                path.push(overlay[current].key());
            }
            None if level > 0 => level -= 1,
            None => break,
        }
    }

    let reached = overlay[current].key() == target;
    RouteOutcome { path, reached }
}

/// Whether hopping from `from` to `to` moves toward `target` without
/// overshooting it.
fn advances(from: NodeKey, to: NodeKey, target: NodeKey) -> bool {
    if target > from {
        to > from && to <= target
    } else {
        to < from && to >= target
    }
}
