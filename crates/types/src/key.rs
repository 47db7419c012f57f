//! Node identity keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node's identity key.
///
/// Keys are unique within an overlay and define the total order that the
/// level-0 neighbor ring follows. The simulator draws them from a seeded RNG,
/// but any unique `u64` assignment works.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// Smallest possible key.
    pub const MIN: Self = Self(u64::MIN);

    /// Largest possible key.
    pub const MAX: Self = Self(u64::MAX);

    /// Absolute distance to another key in key space.
    pub fn distance(self, other: NodeKey) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({})", self.0)
    }
}

impl From<u64> for NodeKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ordering() {
        assert!(NodeKey(1) < NodeKey(2));
        assert!(NodeKey::MIN < NodeKey::MAX);
    }

    #[test]
    fn test_key_distance_symmetric() {
        assert_eq!(NodeKey(10).distance(NodeKey(3)), 7);
        assert_eq!(NodeKey(3).distance(NodeKey(10)), 7);
        assert_eq!(NodeKey(5).distance(NodeKey(5)), 0);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(NodeKey(123).to_string(), "N123");
    }
}
