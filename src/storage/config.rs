//! Configuration handling
//!
//! Settings are read from a TOML file: the one named with `--config`, or
//! `config.toml` in the per-user config directory. Every key is optional.
//!
//! ```toml
//! [plotter]
//! device = "/dev/ttyUSB0"
//! test_pattern = "test.plot"
//!
//! [ledger]
//! path = "art_editions.json"
//!
//! [release]
//! strict = false
//! group = "nycresistor"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DEFAULT_GROUP;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Plotter connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Serial device the plotter is attached to
    pub device: PathBuf,

    /// Command script played by `test`
    pub test_pattern: PathBuf,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/ttyUSB0"),
            test_pattern: PathBuf::from("test.plot"),
        }
    }
}

/// Edition ledger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("art_editions.json"),
        }
    }
}

/// Release pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Abort the ledger commit if any command fails to reach the plotter
    pub strict: bool,

    /// Identity credited on every sheet
    pub group: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            strict: false,
            group: DEFAULT_GROUP.to_string(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plotter: PlotterConfig,
    pub ledger: LedgerConfig,
    pub release: ReleaseConfig,
}

impl Config {
    /// Loads the explicit file if given, otherwise the per-user file if present
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Self::from_file(path);
        }

        match Self::global_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the per-user config file location
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "nycresistor", "artplotter")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")
    }
}
