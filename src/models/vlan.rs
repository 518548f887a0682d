//! VLAN record model and the caller-supplied input payload.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::ValidationError;

/// A persisted VLAN configuration record.
///
/// Field names are snake_case on the wire to stay compatible with existing data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "vlan_id")]
    pub vlan_tag: i64,
    pub subnet: String,
    pub gateway: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a VLAN.
///
/// Missing or `null` fields decode to their zero value and are left for validation to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "vlan_id", default, deserialize_with = "null_as_default")]
    pub vlan_tag: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subnet: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gateway: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Operational state of a VLAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VlanStatus {
    Active,
    Inactive,
    Maintenance,
}

impl VlanStatus {
    pub const ALL: [VlanStatus; 3] = [
        VlanStatus::Active,
        VlanStatus::Inactive,
        VlanStatus::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VlanStatus::Active => "active",
            VlanStatus::Inactive => "inactive",
            VlanStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for VlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match; surrounding whitespace is not trimmed.
impl FromStr for VlanStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VlanStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(ValidationError::InvalidStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_wire_names() {
        let now = Utc::now();
        let record = VlanRecord {
            id: 7,
            name: "Prod".to_string(),
            vlan_tag: 100,
            subnet: "192.168.1.0/24".to_string(),
            gateway: "192.168.1.1".to_string(),
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["vlan_id"], 100);
        assert!(value.get("vlan_tag").is_none());
        assert!(value["created_at"].is_string());
        assert!(value["updated_at"].is_string());
    }

    #[test]
    fn test_record_reads_offset_timestamps() {
        let value = json!({
            "id": 1,
            "name": "Legacy",
            "vlan_id": 10,
            "subnet": "10.0.0.0/8",
            "gateway": "10.0.0.1",
            "status": "inactive",
            "created_at": "2024-03-01T10:15:30.123456789+02:00",
            "updated_at": "2024-03-01T08:15:30Z"
        });

        let record: VlanRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.created_at.to_rfc3339(), "2024-03-01T08:15:30.123456789+00:00");
        assert_eq!(record.updated_at.timestamp(), record.created_at.timestamp());
    }

    #[test]
    fn test_input_missing_and_null_fields_default() {
        let input: VlanInput =
            serde_json::from_value(json!({ "vlan_id": 100, "subnet": null })).unwrap();
        assert_eq!(
            input,
            VlanInput {
                vlan_tag: 100,
                ..VlanInput::default()
            }
        );

        let empty: VlanInput = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, VlanInput::default());

        assert!(serde_json::from_value::<VlanInput>(json!({ "vlan_id": "ten" })).is_err());
    }

    #[test]
    fn test_status_parsing_is_exact() {
        assert_eq!("active".parse::<VlanStatus>(), Ok(VlanStatus::Active));
        assert_eq!("maintenance".parse::<VlanStatus>(), Ok(VlanStatus::Maintenance));
        assert!("Active".parse::<VlanStatus>().is_err());
        assert!(" active".parse::<VlanStatus>().is_err());
        assert!("".parse::<VlanStatus>().is_err());
    }
}
