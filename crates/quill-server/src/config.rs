//! Server configuration types.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Configuration for the Quill server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// API listen address.
    pub api_addr: SocketAddr,
    /// Log level.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_addr: "127.0.0.1:3000".parse().expect("valid default address"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}
