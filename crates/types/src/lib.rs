//! Foundational types for the skip graph overlay simulator.
//!
//! This crate provides the types shared by every layer:
//!
//! - [`NodeKey`]: the unique, totally ordered node identity
//! - [`MembershipVector`]: the per-node digit string that defines group
//!   membership at every level
//! - [`OverlayParams`]: the (base, length) pair fixed per overlay instance
//! - [`JoinMode`] / [`UnicastAlgorithm`]: the closed sets of construction
//!   and routing strategies
//! - [`ConfigError`] / [`BuildError`]: the error taxonomy
//!
//! # Design Philosophy
//!
//! This crate is self-contained and does not depend on any other workspace
//! crates, making it the foundation layer.

mod error;
mod key;
mod membership;
mod params;

pub use error::{BuildError, ConfigError};
pub use key::NodeKey;
pub use membership::MembershipVector;
pub use params::{JoinMode, OverlayParams, ParseModeError, UnicastAlgorithm};
