//! Skip graph simulator front end.
//!
//! A thin layer over `sgsim-simulation`: the CLI binary parses run
//! parameters, hands them to the experiment harness, and renders the
//! resulting reports either as human-readable text or as JSON for the
//! plotting layer.

mod render;

pub use render::{print_sweep, print_topology, print_unicast};
