use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::menu::InvalidFilterPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Items the menu starts with
    #[serde(default)]
    pub initial_items: Vec<String>,

    /// How filter text that is not a valid pattern is matched
    #[serde(default)]
    pub invalid_filter: InvalidFilterPolicy,
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("sidemenu");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path` (or the default location), falling back to defaults.
    ///
    /// A missing file is only an error when `path` was given explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                anyhow::bail!("Config file not found: {}", p.display());
            }
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Ok(p) => p,
                Err(_) => return Ok(AppConfig::default()),
            },
        };

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!("Failed to parse config: {}", e),
            },
            Err(e) => tracing::warn!("Failed to read config: {}", e),
        }

        Ok(AppConfig::default())
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
