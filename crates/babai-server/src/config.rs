//! Configuration loading for the game server.
//!
//! The canonical configuration lives in `babai-config.yaml` at the
//! project root. This module defines typed structs mirroring the YAML
//! structure; every field has a default so a missing file still yields
//! a working local server.

use std::path::Path;

use babai_state::EconomyTuning;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game server configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Listen address settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Save blob location.
    #[serde(default)]
    pub storage: StorageSection,

    /// Economy tuning (costs, multipliers, regeneration timing).
    #[serde(default)]
    pub economy: EconomyTuning,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `BABAI_PORT` overrides `server.port`
    /// - `BABAI_SAVE_PATH` overrides `storage.save_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("BABAI_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(path) = std::env::var("BABAI_SAVE_PATH")
            && !path.is_empty()
        {
            self.storage.save_path = path;
        }
    }
}

/// Listen address settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Save blob location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSection {
    /// Path of the JSON save blob.
    #[serde(default = "default_save_path")]
    pub save_path: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_save_path() -> String {
    String::from("babai-save.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = GameConfig::parse("{}");
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.save_path, "babai-save.json");
        assert_eq!(config.economy.starting_energy, 50);
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let yaml = r"
server:
  port: 9000
economy:
  starting_energy: 10
";
        let config = GameConfig::parse(yaml).unwrap_or_default();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.economy.starting_energy, 10);
        assert_eq!(config.economy.energy_regen_interval_secs, 300);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(GameConfig::parse(": not yaml :").is_err());
    }
}
