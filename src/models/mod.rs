//! Data models for the VLAN service.
//!
//! Wire names match the JSON data file and the public API exactly.

mod dataset;
mod health;
mod vlan;

pub use dataset::*;
pub use health::*;
pub use vlan::*;
