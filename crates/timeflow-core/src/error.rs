//! Core error types for timeflow-core.
//!
//! The timer engine itself has no error paths -- every numeric input is
//! clamped and every operation is total. Errors only exist at the storage
//! boundary (configuration and preset files).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timeflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Preset storage errors
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Preset-storage errors.
#[derive(Error, Debug)]
pub enum PresetError {
    /// Failed to read or parse the preset file
    #[error("Failed to load presets from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the preset file
    #[error("Failed to save presets to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Underlying data directory problem
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
