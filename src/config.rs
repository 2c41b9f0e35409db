//! Mount configuration
//!
//! A [`ClientConfig`] describes one logical mount: which cluster to talk
//! to, which volume, and how the native driver should behave. It loads
//! from TOML and is pushed into a not-yet-started session as the driver's
//! key/value options.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configuration constants
pub mod defaults {
    /// Default log level for the driver and for [`crate::logging::init`].
    pub const fn default_log_level() -> &'static str {
        "info"
    }

    /// Serve reads from follower metadata replicas by default?
    pub const FOLLOWER_READ: bool = false;
}

/// Configuration for one mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Master (metadata service) addresses, comma-separated host:port.
    pub master_addr: String,

    /// Volume to mount.
    pub vol_name: String,

    /// Volume owner credential.
    pub owner: String,

    /// Driver log directory. Driver default applies when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Allow reads from follower metadata replicas.
    #[serde(default = "default_follower_read")]
    pub follower_read: bool,
}

fn default_log_level() -> String {
    defaults::default_log_level().to_string()
}

fn default_follower_read() -> bool {
    defaults::FOLLOWER_READ
}

impl ClientConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("Failed to read config file: {}", e)))?;

        let config: ClientConfig = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializeError(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, contents)
            .map_err(|e| ConfigError::WriteError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// The driver option key/value pairs this configuration expands to,
    /// in the order they are applied to a session.
    pub fn options(&self) -> Vec<(&'static str, String)> {
        let mut opts = vec![
            ("masterAddr", self.master_addr.clone()),
            ("volName", self.vol_name.clone()),
            ("owner", self.owner.clone()),
            ("logLevel", self.log_level.clone()),
            ("followerRead", self.follower_read.to_string()),
        ];
        if let Some(dir) = &self.log_dir {
            opts.push(("logDir", dir.display().to_string()));
        }
        opts
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.master_addr.is_empty() {
            return Err(ConfigError::ValidationError(
                "Master address cannot be empty".to_string(),
            ));
        }

        if self.vol_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "Volume name cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {}",
                    self.log_level
                )));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Failed to write config: {0}")]
    WriteError(String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClientConfig {
        ClientConfig {
            master_addr: "10.0.0.1:17010,10.0.0.2:17010".to_string(),
            vol_name: "vol1".to_string(),
            owner: "svc".to_string(),
            log_dir: None,
            log_level: default_log_level(),
            follower_read: false,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = sample();
        assert!(config.validate().is_ok());

        config.master_addr = "".to_string();
        assert!(config.validate().is_err());

        config = sample();
        config.vol_name = "".to_string();
        assert!(config.validate().is_err());

        config = sample();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = sample();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: ClientConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.master_addr, deserialized.master_addr);
        assert_eq!(config.vol_name, deserialized.vol_name);
    }

    #[test]
    fn test_config_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        sample().to_file(file.path().to_str().unwrap()).unwrap();

        let loaded = ClientConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.vol_name, "vol1");
        assert_eq!(loaded.log_level, "info");
        assert!(!loaded.follower_read);
    }

    #[test]
    fn test_options_skip_unset_log_dir() {
        let mut config = sample();
        let opts = config.options();
        assert!(opts.iter().all(|(k, _)| *k != "logDir"));
        assert!(opts.iter().any(|(k, v)| *k == "volName" && v == "vol1"));

        config.log_dir = Some(PathBuf::from("/var/log/dfs"));
        let opts = config.options();
        assert!(opts.iter().any(|(k, v)| *k == "logDir" && v == "/var/log/dfs"));
    }
}
