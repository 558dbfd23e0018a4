mod config;
mod presets;

pub use config::{Config, DisplayConfig, DisplayMode, NotificationsConfig};
pub use presets::{Preset, PresetStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/timeflow[-dev]/` based on TIMEFLOW_ENV.
///
/// Set TIMEFLOW_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMEFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timeflow-dev")
    } else {
        base_dir.join("timeflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
