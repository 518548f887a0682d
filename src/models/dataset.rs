//! The full collection of VLAN records, mirroring the JSON data file.

use serde::{Deserialize, Serialize};

use super::VlanRecord;

/// Root document of the data file: `{"vlans": [...]}` in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanDataset {
    #[serde(default)]
    pub vlans: Vec<VlanRecord>,
}
