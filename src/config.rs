//! Configuration module for skein

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
///
/// The password is never stored here; the CLI reads it from the
/// `SKEIN_PASSWORD` environment variable or a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pod base URL (e.g. `https://twtxt.net`)
    #[serde(default)]
    pub server_url: String,

    /// Username on the pod
    #[serde(default)]
    pub username: String,

    /// Timeline shown by default (discover, timeline, mentions)
    #[serde(default = "default_timeline")]
    pub default_timeline: String,

    /// Verify TLS certificates
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_timeline() -> String {
    "discover".to_string()
}

fn default_verify_ssl() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            username: String::new(),
            default_timeline: default_timeline(),
            verify_ssl: default_verify_ssl(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        crate::paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}
