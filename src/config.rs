//! Configuration file loading
//!
//! The config is a TOML document with a single top-level `configuration`
//! table. Only the Telegram credentials are required; everything else has a
//! default that matches the public job board this tool was written for.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::WatchError;

pub const DEFAULT_SOURCE_URL: &str =
    "https://www.ncnonprofits.org/nc-nonprofit-careers/search-posted-jobs";
pub const DEFAULT_BASE_URL: &str = "https://www.ncnonprofits.org";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
const CONFIG_DIR_NAME: &str = "jobwatch";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Deserialize)]
struct ConfigFile {
    configuration: Config,
}

/// Settings for one run, loaded once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub api_key: String,
    pub chat_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            log_file: default_log_file(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_api_base() -> String {
    DEFAULT_TELEGRAM_API.to_string()
}

fn default_parse_mode() -> String {
    "Markdown".to_string()
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_state_file() -> PathBuf {
    PathBuf::from("run_timestamp.txt")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("log.txt")
}

/// Default config location: `$XDG_CONFIG_HOME/jobwatch/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

/// Read and validate the config file at `path`
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        WatchError::ConfigError(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<Config> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| WatchError::ConfigError(e.to_string()))?;
    let config = file.configuration;

    if config.telegram.api_key.trim().is_empty() {
        return Err(WatchError::ConfigError("telegram.api_key is empty".to_string()).into());
    }
    if config.telegram.chat_id.trim().is_empty() {
        return Err(WatchError::ConfigError("telegram.chat_id is empty".to_string()).into());
    }

    Ok(config)
}
