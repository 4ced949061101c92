//! TOML configuration.
//!
//! ```toml
//! [data]
//! records_path = "data/records.json"   # optional
//!
//! [search]
//! final_limit = 50
//!
//! [chat]
//! provider = "keyword"
//! response_delay_ms = 1500
//!
//! [server]
//! bind = "127.0.0.1:7340"
//! ```
//!
//! Every section is optional; missing values fall back to the defaults
//! below.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    /// JSON array of records. The built-in sample table is used when unset.
    #[serde(default)]
    pub records_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_final_limit")]
    pub final_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            final_limit: default_final_limit(),
        }
    }
}

fn default_final_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Simulated backend latency before each reply. `0` disables it.
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            response_delay_ms: default_response_delay_ms(),
        }
    }
}

fn default_provider() -> String {
    "keyword".to_string()
}
fn default_response_delay_ms() -> u64 {
    1500
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// All defaults: sample records, keyword chat, local bind address.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.search.final_limit < 1 {
        anyhow::bail!("search.final_limit must be >= 1");
    }

    match config.chat.provider.as_str() {
        "keyword" => {}
        other => anyhow::bail!("Unknown chat provider: '{}'. Must be keyword.", other),
    }

    Ok(())
}
