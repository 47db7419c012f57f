//! Serializable topology exports for external rendering.

use serde::Serialize;
use sgsim_types::NodeKey;

/// Per-node neighbor listing up to a requested level depth.
///
/// This is the read model handed to the reporting/plotting collaborator; it
/// contains keys only, never node indices, so it is meaningful outside the
/// producing process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologySnapshot {
    /// Membership vector base of the producing overlay.
    pub base: u8,
    /// Deepest level included (inclusive).
    pub max_level: usize,
    /// Nodes in ascending key order.
    pub nodes: Vec<NodeSnapshot>,
}

/// One node's identity and neighbor listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    /// The node's key.
    pub key: NodeKey,
    /// The node's membership vector rendered as a digit string.
    pub membership: String,
    /// Neighbor entries for levels `0..=max_level`.
    pub levels: Vec<LevelSnapshot>,
}

/// Neighbor keys at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelSnapshot {
    /// The level this entry describes.
    pub level: usize,
    /// Key of the LEFT neighbor, absent at the group minimum.
    pub left: Option<NodeKey>,
    /// Key of the RIGHT neighbor, absent at the group maximum.
    pub right: Option<NodeKey>,
}
