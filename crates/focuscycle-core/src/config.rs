//! TOML-based application configuration.
//!
//! Stores user preferences: the timer settings, notification options,
//! and the boundary auto-advance policy for the CLI adapter. Stored at
//! `~/.config/focuscycle/config.toml`. Only configuration persists --
//! timer state and the session log are process-lifetime.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::settings::TimerSettings;

/// Returns the config directory, creating it if needed.
///
/// `FOCUSCYCLE_HOME` overrides the base directory (used by tests);
/// `FOCUSCYCLE_ENV=dev` selects `focuscycle-dev` instead of `focuscycle`.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = match std::env::var_os("FOCUSCYCLE_HOME") {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("FOCUSCYCLE_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("focuscycle-dev")
    } else {
        base_dir.join("focuscycle")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focuscycle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Re-arm the next session automatically at each boundary instead of
    /// waiting for the user. Adapter policy only; the controller itself
    /// always pauses at boundaries.
    #[serde(default)]
    pub auto_advance: bool,
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, holds
    /// invalid timer settings, or the default config cannot be written.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                cfg.timer.validate().map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, the resulting timer settings are invalid, or the config
    /// cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated
            .timer
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        *self = updated;
        self.save()?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Value::Number(n.into())
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}
