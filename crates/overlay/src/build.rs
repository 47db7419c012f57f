//! Overlay construction: batch materialization and incremental joins.

use crate::check;
use crate::node::{NodeIndex, NodeRecord, Side};
use crate::overlay::Overlay;
use serde::Serialize;
use sgsim_types::{BuildError, JoinMode, MembershipVector, NodeKey, OverlayParams};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Traversal-cost accounting for incremental construction.
///
/// Batch construction materializes the neighbor tables directly and has no
/// notion of join cost, so only [`Overlay::build_incremental`] produces one
/// of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    /// Steps walked by each join, in join order. The first node joins an
    /// empty overlay and costs zero.
    pub per_join_hops: Vec<u64>,
}

impl JoinStats {
    /// Total steps across all joins.
    pub fn total_hops(&self) -> u64 {
        self.per_join_hops.iter().sum()
    }

    /// Mean steps per join.
    pub fn mean_hops(&self) -> f64 {
        if self.per_join_hops.is_empty() {
            0.0
        } else {
            self.total_hops() as f64 / self.per_join_hops.len() as f64
        }
    }
}

impl Overlay {
    /// Build an overlay in the requested mode.
    ///
    /// Batch mode reports no join costs; the returned stats are `None`.
    pub fn build(
        params: OverlayParams,
        identities: Vec<(NodeKey, MembershipVector)>,
        mode: JoinMode,
    ) -> Result<(Overlay, Option<JoinStats>), BuildError> {
        match mode {
            JoinMode::Batch => Ok((Self::build_batch(params, identities)?, None)),
            JoinMode::Incremental => {
                let (overlay, stats) = Self::build_incremental(params, identities)?;
                Ok((overlay, Some(stats)))
            }
        }
    }

    /// Build from all identities in one global pass ("fast" construction).
    ///
    /// Nodes are sorted by key once; each level is then linked by scanning
    /// that order and chaining nodes per level-prefix group, which
    /// materializes the neighbor invariant directly.
    pub fn build_batch(
        params: OverlayParams,
        identities: Vec<(NodeKey, MembershipVector)>,
    ) -> Result<Overlay, BuildError> {
        validate_identities(params, &identities)?;

        let mut overlay = Overlay::with_capacity(params, identities.len());
        for (key, membership) in identities {
            overlay.push_node(NodeRecord::new(key, membership, params.table_len()));
        }
        overlay.link_all_levels();

        debug!(nodes = overlay.len(), "built overlay in one pass");
        debug_assert_eq!(check::check_neighbor_tables(&overlay), Ok(()));
        Ok(overlay)
    }

    /// Build by joining identities one at a time, in the supplied order.
    ///
    /// Each node after the first is introduced through the overlay's first
    /// member: a level-0 walk locates the key predecessor, then each level
    /// walks the ring one level below to the nearest member of the node's
    /// group at that level. Every traversal step is counted in the returned
    /// [`JoinStats`].
    pub fn build_incremental(
        params: OverlayParams,
        identities: Vec<(NodeKey, MembershipVector)>,
    ) -> Result<(Overlay, JoinStats), BuildError> {
        // All inputs are checked up front so a bad identity cannot leave a
        // partially joined overlay behind.
        validate_identities(params, &identities)?;

        let mut overlay = Overlay::with_capacity(params, identities.len());
        let mut stats = JoinStats::default();
        for (key, membership) in identities {
            let hops = overlay.join(key, membership);
            stats.per_join_hops.push(hops);
        }

        debug!(
            nodes = overlay.len(),
            total_join_hops = stats.total_hops(),
            "built overlay incrementally"
        );
        debug_assert_eq!(check::check_neighbor_tables(&overlay), Ok(()));
        Ok((overlay, stats))
    }

    /// Splice one new node in, returning the traversal steps spent.
    fn join(&mut self, key: NodeKey, membership: MembershipVector) -> u64 {
        let table_len = self.params().table_len();
        let index = self.push_node(NodeRecord::new(key, membership, table_len));
        if self.len() == 1 {
            return 0;
        }

        let mut cost = 0u64;

        // Level 0 is a plain sorted ring: walk from the introducer to the
        // key predecessor and splice between it and its old successor.
        let introducer: NodeIndex = 0;
        let (left, right) = self.locate_level0(introducer, key, &mut cost);
        self.splice(0, index, left, right);

        // Each higher level starts from the links one level below and walks
        // outward to the nearest node sharing the deeper prefix. Once a
        // level has no members on either side, no deeper level can have any.
        for level in 1..=self.params().levels {
            let left = self.scan_for_group(index, level, Side::Left, &mut cost);
            let right = self.scan_for_group(index, level, Side::Right, &mut cost);
            if left.is_none() && right.is_none() {
                break;
            }
            self.splice(level, index, left, right);
        }

        cost
    }

    /// Find the level-0 predecessor and successor of `key`, walking the
    /// base ring from `start` and charging each step to `cost`.
    fn locate_level0(
        &self,
        start: NodeIndex,
        key: NodeKey,
        cost: &mut u64,
    ) -> (Option<NodeIndex>, Option<NodeIndex>) {
        let mut cursor = start;
        if self[cursor].key() < key {
            while let Some(next) = self[cursor].right(0) {
                if self[next].key() > key {
                    break;
                }
                cursor = next;
                *cost += 1;
            }
            (Some(cursor), self[cursor].right(0))
        } else {
            while self[cursor].key() > key {
                match self[cursor].left(0) {
                    Some(prev) => {
                        cursor = prev;
                        *cost += 1;
                    }
                    // The new node becomes the minimum; the walk ended on
                    // the old minimum, its successor.
                    None => return (None, Some(cursor)),
                }
            }
            (Some(cursor), self[cursor].right(0))
        }
    }

    /// Walk the level-(`level`-1) list away from `index` on `side` to the
    /// nearest member of `index`'s level-`level` group.
    fn scan_for_group(
        &self,
        index: NodeIndex,
        level: usize,
        side: Side,
        cost: &mut u64,
    ) -> Option<NodeIndex> {
        let membership = self[index].membership();
        let mut cursor = self[index].neighbor(level - 1, side);
        while let Some(candidate) = cursor {
            *cost += 1;
            if self[candidate].membership().same_group_at(membership, level) {
                return Some(candidate);
            }
            cursor = self[candidate].neighbor(level - 1, side);
        }
        None
    }

    /// Insert `index` between `left` and `right` at `level`, updating both
    /// back-pointers.
    fn splice(
        &mut self,
        level: usize,
        index: NodeIndex,
        left: Option<NodeIndex>,
        right: Option<NodeIndex>,
    ) {
        self.node_mut(index).set_neighbor(level, Side::Left, left);
        self.node_mut(index).set_neighbor(level, Side::Right, right);
        if let Some(left) = left {
            self.node_mut(left).set_neighbor(level, Side::Right, Some(index));
        }
        if let Some(right) = right {
            self.node_mut(right).set_neighbor(level, Side::Left, Some(index));
        }
    }

    /// Chain every level-prefix group in key order, for all levels at once.
    fn link_all_levels(&mut self) {
        let order: Vec<NodeIndex> = self.indices_by_key().collect();
        for level in 0..=self.params().levels {
            // Last-seen node per prefix group; inserting links the newcomer
            // behind it.
            let mut tail: HashMap<Vec<u8>, NodeIndex> = HashMap::new();
            for &index in &order {
                let prefix = self[index].membership().digits()[..level].to_vec();
                if let Some(prev) = tail.insert(prefix, index) {
                    self.node_mut(prev).set_neighbor(level, Side::Right, Some(index));
                    self.node_mut(index).set_neighbor(level, Side::Left, Some(prev));
                }
            }
        }
    }
}

fn validate_identities(
    params: OverlayParams,
    identities: &[(NodeKey, MembershipVector)],
) -> Result<(), BuildError> {
    params.validate()?;
    let mut seen = HashSet::with_capacity(identities.len());
    for (key, membership) in identities {
        if membership.len() != params.levels {
            return Err(BuildError::VectorLengthMismatch {
                expected: params.levels,
                actual: membership.len(),
            });
        }
        if !seen.insert(*key) {
            return Err(BuildError::DuplicateKey { key: *key });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(digits: &[u8]) -> MembershipVector {
        MembershipVector::new(digits.to_vec())
    }

    fn params() -> OverlayParams {
        OverlayParams::new(2, 2).unwrap()
    }

    #[test]
    fn test_batch_links_level_zero_ring() {
        let overlay = Overlay::build_batch(
            params(),
            vec![
                (NodeKey(30), mv(&[0, 0])),
                (NodeKey(10), mv(&[1, 1])),
                (NodeKey(20), mv(&[0, 1])),
            ],
        )
        .unwrap();

        let keys: Vec<NodeKey> = overlay.keys().collect();
        assert_eq!(keys, vec![NodeKey(10), NodeKey(20), NodeKey(30)]);

        let first = overlay.index_of(NodeKey(10)).unwrap();
        let mid = overlay.index_of(NodeKey(20)).unwrap();
        let last = overlay.index_of(NodeKey(30)).unwrap();

        assert_eq!(overlay[first].left(0), None);
        assert_eq!(overlay[first].right(0), Some(mid));
        assert_eq!(overlay[mid].left(0), Some(first));
        assert_eq!(overlay[mid].right(0), Some(last));
        assert_eq!(overlay[last].right(0), None);
    }

    #[test]
    fn test_batch_groups_by_prefix_above_level_zero() {
        let overlay = Overlay::build_batch(
            params(),
            vec![
                (NodeKey(1), mv(&[0, 0])),
                (NodeKey(2), mv(&[1, 0])),
                (NodeKey(3), mv(&[0, 1])),
                (NodeKey(4), mv(&[1, 1])),
            ],
        )
        .unwrap();

        // Level 1 splits on the first digit: {1, 3} and {2, 4}.
        let n1 = overlay.index_of(NodeKey(1)).unwrap();
        let n2 = overlay.index_of(NodeKey(2)).unwrap();
        let n3 = overlay.index_of(NodeKey(3)).unwrap();
        let n4 = overlay.index_of(NodeKey(4)).unwrap();

        assert_eq!(overlay[n1].right(1), Some(n3));
        assert_eq!(overlay[n3].left(1), Some(n1));
        assert_eq!(overlay[n2].right(1), Some(n4));
        assert_eq!(overlay[n4].left(1), Some(n2));

        // Level 2 needs a full vector match; all vectors are distinct.
        for index in [n1, n2, n3, n4] {
            assert_eq!(overlay[index].left(2), None);
            assert_eq!(overlay[index].right(2), None);
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = Overlay::build_batch(
            params(),
            vec![(NodeKey(5), mv(&[0, 0])), (NodeKey(5), mv(&[1, 0]))],
        )
        .unwrap_err();
        assert_eq!(err, BuildError::DuplicateKey { key: NodeKey(5) });
    }

    #[test]
    fn test_vector_length_mismatch_rejected() {
        let err = Overlay::build_batch(params(), vec![(NodeKey(5), mv(&[0, 0, 0]))]).unwrap_err();
        assert_eq!(
            err,
            BuildError::VectorLengthMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_full_vector_collision_is_legal() {
        let overlay = Overlay::build_batch(
            params(),
            vec![(NodeKey(1), mv(&[0, 1])), (NodeKey(2), mv(&[0, 1]))],
        )
        .unwrap();

        // Both nodes share the top-level group and link to each other there.
        let n1 = overlay.index_of(NodeKey(1)).unwrap();
        let n2 = overlay.index_of(NodeKey(2)).unwrap();
        assert_eq!(overlay[n1].right(2), Some(n2));
        assert_eq!(overlay[n2].left(2), Some(n1));
    }

    #[test]
    fn test_incremental_single_node_costs_nothing() {
        let (overlay, stats) =
            Overlay::build_incremental(params(), vec![(NodeKey(9), mv(&[1, 0]))]).unwrap();
        assert_eq!(overlay.len(), 1);
        assert_eq!(stats.per_join_hops, vec![0]);
    }

    #[test]
    fn test_incremental_join_left_of_introducer() {
        // Second node's key is below the first node's, exercising the
        // leftward level-0 walk and the new-minimum splice.
        let (overlay, stats) = Overlay::build_incremental(
            params(),
            vec![(NodeKey(50), mv(&[0, 0])), (NodeKey(10), mv(&[0, 1]))],
        )
        .unwrap();

        let low = overlay.index_of(NodeKey(10)).unwrap();
        let high = overlay.index_of(NodeKey(50)).unwrap();
        assert_eq!(overlay[low].right(0), Some(high));
        assert_eq!(overlay[high].left(0), Some(low));
        // Shared first digit links them at level 1 as well.
        assert_eq!(overlay[low].right(1), Some(high));
        assert_eq!(stats.per_join_hops.len(), 2);
    }

    #[test]
    fn test_join_stats_totals() {
        let stats = JoinStats {
            per_join_hops: vec![0, 2, 4],
        };
        assert_eq!(stats.total_hops(), 6);
        assert!((stats.mean_hops() - 2.0).abs() < f64::EPSILON);
    }
}
