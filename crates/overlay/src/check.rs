//! Brute-force neighbor verification.
//!
//! Construction must leave every neighbor entry equal to what a global
//! recomputation would produce. Divergence is a construction defect, so the
//! builders assert against this checker in debug builds and tests call it
//! directly.

use crate::node::Side;
use crate::overlay::Overlay;
use sgsim_types::NodeKey;

/// A neighbor entry that disagrees with the brute-force recomputation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{key} level {level} {side:?}: expected {expected:?}, found {actual:?}")]
pub struct InvariantViolation {
    /// Key of the node with the bad entry.
    pub key: NodeKey,
    /// Level of the bad entry.
    pub level: usize,
    /// Side of the bad entry.
    pub side: Side,
    /// What recomputation says the entry should hold.
    pub expected: Option<NodeKey>,
    /// What the table actually holds.
    pub actual: Option<NodeKey>,
}

/// Recompute every neighbor entry from first principles and compare.
///
/// For each node and level, the expected LEFT neighbor is the largest key
/// below the node's own among nodes sharing its level prefix; symmetric for
/// RIGHT. Quadratic in the population, intended for tests and debug
/// assertions on small overlays.
pub fn check_neighbor_tables(overlay: &Overlay) -> Result<(), InvariantViolation> {
    for (index, record) in overlay.iter() {
        for level in 0..=overlay.params().levels {
            let mut expected_left: Option<NodeKey> = None;
            let mut expected_right: Option<NodeKey> = None;
            for (other_index, other) in overlay.iter() {
                if other_index == index
                    || !record.membership().same_group_at(other.membership(), level)
                {
                    continue;
                }
                if other.key() < record.key() {
                    if expected_left.map_or(true, |best| other.key() > best) {
                        expected_left = Some(other.key());
                    }
                } else if expected_right.map_or(true, |best| other.key() < best) {
                    expected_right = Some(other.key());
                }
            }

            for (side, expected) in [(Side::Left, expected_left), (Side::Right, expected_right)] {
                let actual = overlay.neighbor_key(index, level, side);
                if actual != expected {
                    return Err(InvariantViolation {
                        key: record.key(),
                        level,
                        side,
                        expected,
                        actual,
                    });
                }
            }
        }
    }
    Ok(())
}
