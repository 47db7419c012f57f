//! Arena node records and per-level neighbor links.

use sgsim_types::{MembershipVector, NodeKey};

/// Index of a node in the overlay's owning store.
///
/// Left/right links reference each other mutually, so they are stored as
/// indices into one owning collection rather than as references. This is a
/// simulation-local address; nothing outside a single overlay instance may
/// interpret it.
pub type NodeIndex = u32;

/// Which side of a node a neighbor sits on, in key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Toward smaller keys.
    Left,
    /// Toward larger keys.
    Right,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Neighbor slots for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelLinks {
    /// The largest-key member of this level's group below the owning node,
    /// if any.
    pub left: Option<NodeIndex>,

    /// The smallest-key member of this level's group above the owning node,
    /// if any.
    pub right: Option<NodeIndex>,
}

impl LevelLinks {
    /// The link on the given side.
    pub fn get(&self, side: Side) -> Option<NodeIndex> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set(&mut self, side: Side, neighbor: Option<NodeIndex>) {
        match side {
            Side::Left => self.left = neighbor,
            Side::Right => self.right = neighbor,
        }
    }
}

/// One overlay member: identity, membership vector, neighbor table.
///
/// Records are created during construction and their links are mutated only
/// by the builder; the router reads them without locking.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    key: NodeKey,
    membership: MembershipVector,
    /// Indexed by level, `0..=levels`.
    links: Vec<LevelLinks>,
}

impl NodeRecord {
    pub(crate) fn new(key: NodeKey, membership: MembershipVector, table_len: usize) -> Self {
        Self {
            key,
            membership,
            links: vec![LevelLinks::default(); table_len],
        }
    }

    /// The node's identity key.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// The node's membership vector.
    pub fn membership(&self) -> &MembershipVector {
        &self.membership
    }

    /// Number of neighbor-table levels (`levels + 1`).
    pub fn table_len(&self) -> usize {
        self.links.len()
    }

    /// Neighbor links at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is outside the table.
    pub fn links(&self, level: usize) -> LevelLinks {
        self.links[level]
    }

    /// The neighbor on `side` at `level`, if any.
    pub fn neighbor(&self, level: usize, side: Side) -> Option<NodeIndex> {
        self.links[level].get(side)
    }

    /// Level-`level` LEFT neighbor, if any.
    pub fn left(&self, level: usize) -> Option<NodeIndex> {
        self.links[level].left
    }

    /// Level-`level` RIGHT neighbor, if any.
    pub fn right(&self, level: usize) -> Option<NodeIndex> {
        self.links[level].right
    }

    pub(crate) fn set_neighbor(&mut self, level: usize, side: Side, neighbor: Option<NodeIndex>) {
        self.links[level].set(side, neighbor);
    }
}
