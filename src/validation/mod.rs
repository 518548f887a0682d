//! Domain validation for VLAN input.
//!
//! Rules are checked in a fixed order and the first failure wins:
//! name, VLAN tag, subnet, gateway, status.

use std::net::Ipv4Addr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{VlanInput, VlanStatus};

pub const MAX_NAME_LEN: usize = 255;
pub const MIN_VLAN_TAG: i64 = 1;
pub const MAX_VLAN_TAG: i64 = 4094;

/// Exactly four dot-separated groups of one to three digits.
static DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("dotted quad pattern is valid"));

/// The first rule a `VlanInput` violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be between 1 and 255 characters")]
    InvalidName,
    #[error("vlan_id must be between 1 and 4094")]
    InvalidVlanTag,
    #[error("invalid subnet format, must be in CIDR notation (e.g., 192.168.1.0/24)")]
    InvalidSubnet,
    #[error("invalid gateway IP address format")]
    InvalidGateway,
    #[error("status must be one of: active, inactive, maintenance")]
    InvalidStatus,
}

/// Check `input` against the VLAN domain rules.
pub fn validate(input: &VlanInput) -> Result<(), ValidationError> {
    let name_len = input.name.chars().count();
    if name_len == 0 || name_len > MAX_NAME_LEN {
        return Err(ValidationError::InvalidName);
    }

    if !(MIN_VLAN_TAG..=MAX_VLAN_TAG).contains(&input.vlan_tag) {
        return Err(ValidationError::InvalidVlanTag);
    }

    if !is_valid_cidr(&input.subnet) {
        return Err(ValidationError::InvalidSubnet);
    }

    if !is_valid_gateway(&input.gateway) {
        return Err(ValidationError::InvalidGateway);
    }

    input.status.parse::<VlanStatus>()?;

    Ok(())
}

/// IPv4 address, a slash, and a decimal prefix length in 0..=32.
fn is_valid_cidr(cidr: &str) -> bool {
    let Some((addr, prefix)) = cidr.split_once('/') else {
        return false;
    };

    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let prefix_ok = prefix.parse::<u8>().is_ok_and(|len| len <= 32);
    prefix_ok && addr.parse::<Ipv4Addr>().is_ok()
}

/// The shape check runs first so that lenient address forms never slip through.
fn is_valid_gateway(gateway: &str) -> bool {
    DOTTED_QUAD.is_match(gateway) && gateway.parse::<Ipv4Addr>().is_ok()
}
