//! The owning node store and read-side queries.

use crate::node::{NodeIndex, NodeRecord, Side};
use crate::snapshot::{LevelSnapshot, NodeSnapshot, TopologySnapshot};
use sgsim_types::{NodeKey, OverlayParams};
use std::collections::BTreeMap;
use std::ops::Index;

/// A complete skip graph overlay: every node record plus the shared
/// parameters.
///
/// The overlay exclusively owns all records; neighbor entries are
/// [`NodeIndex`] values into the owning store. After construction the
/// structure is read-only, so routing queries may run concurrently against
/// a shared reference without locking.
#[derive(Debug, Clone)]
pub struct Overlay {
    params: OverlayParams,
    nodes: Vec<NodeRecord>,
    by_key: BTreeMap<NodeKey, NodeIndex>,
}

impl Overlay {
    pub(crate) fn with_capacity(params: OverlayParams, capacity: usize) -> Self {
        Self {
            params,
            nodes: Vec::with_capacity(capacity),
            by_key: BTreeMap::new(),
        }
    }

    /// The shared (base, length) parameters.
    pub fn params(&self) -> OverlayParams {
        self.params
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the overlay holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node record by index.
    pub fn get(&self, index: NodeIndex) -> Option<&NodeRecord> {
        self.nodes.get(index as usize)
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: NodeKey) -> bool {
        self.by_key.contains_key(&key)
    }

    /// Index of the node holding `key`, if present.
    pub fn index_of(&self, key: NodeKey) -> Option<NodeIndex> {
        self.by_key.get(&key).copied()
    }

    /// Index of the minimum-key node, if any.
    pub fn min_index(&self) -> Option<NodeIndex> {
        self.by_key.values().next().copied()
    }

    /// Index of the maximum-key node, if any.
    pub fn max_index(&self) -> Option<NodeIndex> {
        self.by_key.values().next_back().copied()
    }

    /// Node indices in ascending key order.
    pub fn indices_by_key(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.by_key.values().copied()
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.by_key.keys().copied()
    }

    /// All records with their indices, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &NodeRecord)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, record)| (i as NodeIndex, record))
    }

    /// The key of the neighbor on `side` at `level` of the node at `index`,
    /// if the entry is populated.
    pub fn neighbor_key(&self, index: NodeIndex, level: usize, side: Side) -> Option<NodeKey> {
        self[index]
            .neighbor(level, side)
            .map(|neighbor| self[neighbor].key())
    }

    /// Export the neighbor tables up to `max_level` (inclusive, clamped to
    /// the table depth), nodes in ascending key order.
    pub fn snapshot(&self, max_level: usize) -> TopologySnapshot {
        let max_level = max_level.min(self.params.levels);
        let nodes = self
            .indices_by_key()
            .map(|index| {
                let record = &self[index];
                let levels = (0..=max_level)
                    .map(|level| LevelSnapshot {
                        level,
                        left: self.neighbor_key(index, level, Side::Left),
                        right: self.neighbor_key(index, level, Side::Right),
                    })
                    .collect();
                NodeSnapshot {
                    key: record.key(),
                    membership: record.membership().to_string(),
                    levels,
                }
            })
            .collect();

        TopologySnapshot {
            base: self.params.base,
            max_level,
            nodes,
        }
    }

    /// Append a record, registering its key. The caller has already checked
    /// for duplicates.
    pub(crate) fn push_node(&mut self, record: NodeRecord) -> NodeIndex {
        let index = self.nodes.len() as NodeIndex;
        self.by_key.insert(record.key(), index);
        self.nodes.push(record);
        index
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut NodeRecord {
        &mut self.nodes[index as usize]
    }
}

impl Index<NodeIndex> for Overlay {
    type Output = NodeRecord;

    /// Direct access for indices produced by this overlay's own links.
    ///
    /// # Panics
    ///
    /// Panics on a foreign or stale index, which is a construction defect.
    fn index(&self, index: NodeIndex) -> &NodeRecord {
        &self.nodes[index as usize]
    }
}
