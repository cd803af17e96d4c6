//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/fitspace/config.toml

pub mod defaults;

use crate::discovery::filter::DiscoveryDefaults;
use crate::discovery::location::LocationMode;
use crate::error::{Error, Result};
use crate::geo::LOCATOR_NAMES;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Defaults for the discovery form
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Coach workspace settings
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Local web front settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the marketplace backend
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Discovery form defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Search radius used when the form leaves it out
    #[serde(default = "default_max_distance")]
    pub max_distance_km: f64,

    /// Result count used when the form leaves it out
    #[serde(default = "default_take")]
    pub take: u32,

    /// Location source used when the form leaves it out
    #[serde(default = "default_location_mode")]
    pub location_mode: LocationMode,

    /// Device locator used in auto mode ("ip" or "none")
    #[serde(default = "default_locator")]
    pub locator: String,

    /// Output format for search results
    #[serde(default = "default_format")]
    pub format: String,
}

/// Coach workspace settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Coach the workspace publishes as
    #[serde(default = "default_coach_id")]
    pub coach_id: i64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_max_distance() -> f64 {
    DEFAULT_MAX_DISTANCE_KM
}
fn default_take() -> u32 {
    DEFAULT_TAKE
}
fn default_location_mode() -> LocationMode {
    LocationMode::from_str(DEFAULT_LOCATION_MODE).unwrap_or_default()
}
fn default_locator() -> String {
    DEFAULT_LOCATOR.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_coach_id() -> i64 {
    DEFAULT_COACH_ID
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance(),
            take: default_take(),
            location_mode: default_location_mode(),
            locator: default_locator(),
            format: default_format(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            coach_id: default_coach_id(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Some(self.api.base_url.clone()),
            ["api", "timeout_secs"] => Some(self.api.timeout_secs.to_string()),

            ["discovery", "max_distance_km"] => Some(self.discovery.max_distance_km.to_string()),
            ["discovery", "take"] => Some(self.discovery.take.to_string()),
            ["discovery", "location_mode"] => Some(self.discovery.location_mode.to_string()),
            ["discovery", "locator"] => Some(self.discovery.locator.clone()),
            ["discovery", "format"] => Some(self.discovery.format.clone()),

            ["workspace", "coach_id"] => Some(self.workspace.coach_id.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => {
                self.api.base_url = value.to_string();
            }
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["discovery", "max_distance_km"] => {
                let km: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid distance value: {}", value))
                })?;
                if !(1.0..=150.0).contains(&km) {
                    return Err(Error::Config(format!(
                        "Distance must be between 1 and 150: {}",
                        value
                    )));
                }
                self.discovery.max_distance_km = km;
            }
            ["discovery", "take"] => {
                let take: u32 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid result count: {}", value))
                })?;
                if !(1..=20).contains(&take) {
                    return Err(Error::Config(format!(
                        "Result count must be between 1 and 20: {}",
                        value
                    )));
                }
                self.discovery.take = take;
            }
            ["discovery", "location_mode"] => {
                self.discovery.location_mode =
                    LocationMode::from_str(value).map_err(Error::Config)?;
            }
            ["discovery", "locator"] => {
                let name = value.to_lowercase();
                if !LOCATOR_NAMES.contains(&name.as_str()) {
                    return Err(Error::Config(format!(
                        "Unknown locator: {} (expected one of: {})",
                        value,
                        LOCATOR_NAMES.join(", ")
                    )));
                }
                self.discovery.locator = name;
            }
            ["discovery", "format"] => {
                self.discovery.format = value.to_string();
            }

            ["workspace", "coach_id"] => {
                self.workspace.coach_id = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid coach id: {}", value))
                })?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.base_url",
            "api.timeout_secs",
            "discovery.max_distance_km",
            "discovery.take",
            "discovery.location_mode",
            "discovery.locator",
            "discovery.format",
            "workspace.coach_id",
            "server.host",
            "server.port",
        ]
    }

    /// Backend base URL, honoring the `FITSPACE_API_URL` override
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone())
    }

    /// Backend request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Defaults applied to absent discovery form fields
    pub fn discovery_defaults(&self) -> DiscoveryDefaults {
        DiscoveryDefaults {
            max_distance_km: self.discovery.max_distance_km,
            take: self.discovery.take,
            location_mode: self.discovery.location_mode,
        }
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.discovery.max_distance_km, 15.0);
        assert_eq!(config.discovery.take, 6);
        assert_eq!(config.discovery.location_mode, LocationMode::Auto);
        assert_eq!(config.workspace.coach_id, 1);
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("discovery.take"), Some("6".to_string()));

        config.set("discovery.take", "10").unwrap();
        assert_eq!(config.get("discovery.take"), Some("10".to_string()));

        config.set("discovery.location_mode", "manual").unwrap();
        assert_eq!(config.discovery.location_mode, LocationMode::Manual);
        assert_eq!(config.get("discovery.location_mode"), Some("manual".to_string()));

        config.set("discovery.locator", "None").unwrap();
        assert_eq!(config.get("discovery.locator"), Some("none".to_string()));

        config.set("api.base_url", "https://api.example.com").unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_out_of_range_values() {
        let mut config = Config::default();
        assert!(config.set("discovery.max_distance_km", "200").is_err());
        assert!(config.set("discovery.take", "0").is_err());
        assert!(config.set("discovery.take", "many").is_err());
        assert!(config.set("discovery.location_mode", "gps").is_err());
        assert!(config.set("discovery.locator", "npne").is_err());
        assert_eq!(config.discovery.locator, "ip");
        assert_eq!(config.discovery.take, 6);
    }

    #[test]
    fn test_discovery_defaults_follow_config() {
        let mut config = Config::default();
        config.set("discovery.max_distance_km", "40").unwrap();
        let defaults = config.discovery_defaults();
        assert_eq!(defaults.max_distance_km, 40.0);
        assert_eq!(defaults.take, 6);
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.api.base_url = "https://backend.test".to_string();
            config.workspace.coach_id = 42;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.api.base_url, "https://backend.test");
            assert_eq!(loaded.workspace.coach_id, 42);
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[api]\nbase_url = \"http://x\"\n").unwrap();
        assert_eq!(loaded.api.base_url, "http://x");
        assert_eq!(loaded.api.timeout_secs, 15);
        assert_eq!(loaded.discovery.take, 6);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[api]"));
        assert!(toml.contains("[discovery]"));
        assert!(toml.contains("[workspace]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("location_mode = \"auto\""));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        for key in &keys {
            assert!(Config::default().get(key).is_some(), "missing getter for {}", key);
        }
    }
}
