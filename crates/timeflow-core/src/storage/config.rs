//! TOML-based application configuration.
//!
//! Stores user preferences for the CLI front end:
//! - Display mode (countdown vs elapsed rendering)
//! - Completion notification (terminal bell) enablement
//! - Optional default preset for `timer run`
//!
//! Configuration is stored at `~/.config/timeflow/config.toml`. Missing files
//! and missing sections fall back to defaults; the core engine never reads
//! this - the CLI wires config values in explicitly.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

/// How the front end renders the running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Show remaining time (total - elapsed).
    Countdown,
    /// Show elapsed time.
    Elapsed,
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Countdown
    }
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Countdown => "countdown",
            DisplayMode::Elapsed => "elapsed",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "countdown" => Ok(DisplayMode::Countdown),
            "elapsed" => Ok(DisplayMode::Elapsed),
            other => Err(format!(
                "unknown display mode '{other}' (expected 'countdown' or 'elapsed')"
            )),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub mode: DisplayMode,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timeflow/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Preset loaded by `timer run` when neither --preset nor --segments is
    /// given.
    #[serde(default)]
    pub default_preset: Option<String>,
}

impl Config {
    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
