//! Configuration module for the VLAN API.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: &str = "1234";
const DEFAULT_DATA_FILE: &str = "./data/data.json";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SERVER_PORT {0:?}: expected a port number")]
    InvalidPort(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON data file
    pub data_file_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error), used when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port_raw = get("SERVER_PORT", DEFAULT_PORT);
        let port: u16 = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        Ok(Self {
            data_file_path: get("DATA_FILE_PATH", DEFAULT_DATA_FILE).into(),
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            log_level: get("LOG_LEVEL", DEFAULT_LOG_LEVEL),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.data_file_path, PathBuf::from("./data/data.json"));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:1234");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_PORT", "8080"),
            ("DATA_FILE_PATH", "/var/lib/vlans.json"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.data_file_path, PathBuf::from("/var/lib/vlans.json"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("SERVER_PORT", ""), ("DATA_FILE_PATH", "")]))
                .unwrap();

        assert_eq!(config.bind_addr.port(), 1234);
        assert_eq!(config.data_file_path, PathBuf::from("./data/data.json"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("SERVER_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(port) if port == "http"));
    }
}
