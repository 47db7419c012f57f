//! Skip graph overlay construction and storage.
//!
//! An overlay is a population of key-ordered nodes where each node keeps,
//! per level, one LEFT and one RIGHT neighbor drawn from the group of nodes
//! sharing its membership-vector prefix at that level. Level 0 is a sorted
//! ring over the whole population; groups only shrink as the level rises.
//!
//! Construction comes in two modes:
//!
//! - [`Overlay::build_batch`]: all identities known up front, neighbor
//!   tables materialized in one global pass.
//! - [`Overlay::build_incremental`]: nodes join one at a time through an
//!   existing member, paying a traversal cost that is reported per join.
//!
//! Both modes leave identical neighbor tables for identical inputs. Once
//! built, an overlay is read-only; routing layers hold `&Overlay` and may
//! query it concurrently.

mod build;
mod check;
mod node;
mod overlay;
mod snapshot;

pub use build::JoinStats;
pub use check::{check_neighbor_tables, InvariantViolation};
pub use node::{LevelLinks, NodeIndex, NodeRecord, Side};
pub use overlay::Overlay;
pub use snapshot::{LevelSnapshot, NodeSnapshot, TopologySnapshot};
