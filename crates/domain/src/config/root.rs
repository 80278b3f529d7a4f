use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::federation::FederationConfig;
use super::logging::LoggingConfig;
use super::refresh::RefreshConfig;
use super::server::ServerConfig;

/// Main configuration structure for RouterFed
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Admin server configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Federation membership and mount table source
    #[serde(default)]
    pub federation: FederationConfig,

    /// Refresh coordinator and client cache tuning
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. routerfed.toml in current directory
    /// 3. /etc/routerfed/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("routerfed.toml").exists() {
            Self::from_file("routerfed.toml")?
        } else if std::path::Path::new("/etc/routerfed/config.toml").exists() {
            Self::from_file("/etc/routerfed/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.admin_port {
            self.server.admin_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(mount_file) = overrides.mount_file {
            self.federation.mount_file = mount_file;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.admin_port == 0 {
            return Err(ConfigError::Validation(
                "Admin port cannot be 0".to_string(),
            ));
        }

        if self.federation.mount_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Mount file path cannot be blank".to_string(),
            ));
        }

        if self.refresh.task_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Refresh task timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub admin_port: Option<u16>,
    pub bind_address: Option<String>,
    pub mount_file: Option<String>,
    pub log_level: Option<String>,
}
