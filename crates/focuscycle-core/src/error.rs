//! Core error types for focuscycle-core.
//!
//! A small thiserror hierarchy: configuration errors for the TOML layer,
//! validation errors for timer settings, and an umbrella `CoreError`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focuscycle-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Settings validation errors.
///
/// `update_settings` rejects bad input outright rather than clamping;
/// the caller surfaces the message to the user.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A duration field must be a positive number of minutes
    #[error("'{field}' must be at least 1 minute (got {value})")]
    ZeroDuration { field: &'static str, value: u64 },

    /// The long-break cadence must be at least 2
    #[error("'sessions_until_long_break' must be at least 2 (got {value}): a cadence of 1 would make every break long")]
    DegenerateCadence { value: u64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
