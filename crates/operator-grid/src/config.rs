// File: operator-grid/src/config.rs
// Purpose: Configuration parsing from grid.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Console configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Console backend connection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    /// Prefix of every endpoint, e.g. "http://host/admin"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Grid behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: u32,
}

/// Operator-facing text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory holding `{language}.json` catalogs
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: String,
}

// Default values
fn default_base_url() -> String {
    "http://127.0.0.1:8080/admin".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_rows_per_page() -> u32 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

fn default_catalog_dir() -> String {
    "static/language".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            catalog_dir: default_catalog_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        if config.grid.rows_per_page == 0 {
            anyhow::bail!("grid.rows_per_page must be positive in {:?}", path);
        }

        Ok(config)
    }

    /// Load configuration from default path (./grid.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("grid.toml")
    }
}
