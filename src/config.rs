//! Configuration file support for ferro-coords.
//!
//! This module provides loading of `.ferro.toml` configuration files
//! which set defaults for variant construction.
//!
//! # Example Configuration
//!
//! ```toml
//! [variants]
//! compact = false
//! coordinate-system = "zero-based"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro.toml` in current directory
//! 2. `~/.config/ferro/config.toml`
//!
//! Values set explicitly on a [`VariantBuilder`](crate::VariantBuilder)
//! take precedence over config file settings.

use crate::coords::CoordinateSystem;
use crate::error::FerroError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parsed configuration from a .ferro.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FerroConfig {
    /// Variant construction defaults.
    pub variants: VariantConfig,
}

/// Variants section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VariantConfig {
    /// Pack eligible variants into the compact representation (default: true)
    pub compact: bool,
    /// Coordinate system when none is given (default: one-based)
    pub coordinate_system: CoordinateSystem,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            compact: true,
            coordinate_system: CoordinateSystem::OneBased,
        }
    }
}

impl FerroConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro.toml` in current directory
    /// 2. `~/.config/ferro/config.toml`
    ///
    /// A file that exists but cannot be read or parsed is skipped with a
    /// warning.
    pub fn load() -> Option<Self> {
        let mut candidates = vec![PathBuf::from(".ferro.toml")];
        if let Some(home) = dirs_home() {
            candidates.push(home.join(".config").join("ferro").join("config.toml"));
        }

        for path in candidates {
            if !path.exists() {
                log::debug!("No config at {}", path.display());
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    log::debug!("Loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => log::warn!("Skipping config {}: {}", path.display(), e),
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Render configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration loading error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Config IO error: {0}")]
    Io(String),
    /// Parse error in config file.
    #[error("Config parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<ConfigError> for FerroError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Io(msg) => FerroError::Io { msg },
            ConfigError::Parse(msg) => FerroError::Config { msg },
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
