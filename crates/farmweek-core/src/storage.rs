//! TOML-based application configuration.
//!
//! Stores the farm location used for live weather lookups and an
//! optional default week-of-year override for planning.
//!
//! Configuration is stored at `~/.config/farmweek/config.toml`; the
//! external event store lives in the same directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/farmweek[-dev]/` based on FARMWEEK_ENV.
///
/// Set FARMWEEK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FARMWEEK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("farmweek-dev")
    } else {
        base_dir.join("farmweek")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/farmweek/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Location passed to the weather provider.
    #[serde(default = "default_location")]
    pub location: String,
    /// Fixed week-of-year for planning; when absent the current ISO
    /// week is used.
    #[serde(default)]
    pub default_week: Option<u32>,
}

fn default_location() -> String {
    "Gimcheon".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: default_location(),
            default_week: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Path of the external event store next to the config.
    pub fn events_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("events.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.location, "Gimcheon");
        assert_eq!(parsed.default_week, None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.location, "Gimcheon");

        let parsed: Config = toml::from_str("default_week = 20").unwrap();
        assert_eq!(parsed.default_week, Some(20));
        assert_eq!(parsed.location, "Gimcheon");
    }
}
