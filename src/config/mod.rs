//! Configuration loading and management

mod settings;

pub use settings::Settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Challenge API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

/// Connection details for the remote challenge API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API; leave empty to run against the in-memory
    /// backend (offline demo mode)
    #[serde(default)]
    pub base_url: String,

    /// Bearer token sent with every request; empty disables auth
    #[serde(default)]
    pub token: String,
}

impl ApiConfig {
    /// Whether no remote API is configured
    pub fn is_offline(&self) -> bool {
        self.base_url.trim().is_empty()
    }

    /// The auth token, if one is configured
    pub fn token(&self) -> Option<String> {
        let token = self.token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration for a directory
    /// Looks for: .rally/config.toml in the directory, then the global
    /// config, then falls back to defaults
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = dir.join(".rally/config.toml");
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        Ok(Self::default())
    }

    /// Path of the per-user config file (~/.rally/config.toml)
    pub fn global_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rally/config.toml")
    }
}
