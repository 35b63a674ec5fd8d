//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid port: {0:?}")]
    InvalidPort(String),
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server information.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Per-connection limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the effective configuration from the first CLI argument and
    /// the `PORT` environment value.
    ///
    /// The argument is either a bare port number or a path to a TOML file.
    /// Without an argument the built-in defaults apply. A `PORT` value, when
    /// present, overrides whichever port the argument produced.
    pub fn resolve(arg: Option<&str>, env_port: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match arg {
            None => Config::default(),
            Some(arg) => match arg.parse::<u16>() {
                Ok(port) => {
                    let mut config = Config::default();
                    config.listen.set_port(port);
                    config
                }
                Err(_) => Config::load(arg)?,
            },
        };

        if let Some(raw) = env_port.map(str::trim).filter(|p| !p.is_empty()) {
            let port = raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
            config.listen.set_port(port);
        }

        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used in logs (default: "relayd").
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Prometheus metrics HTTP port. Absent or 0 disables the endpoint.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            metrics_port: None,
        }
    }
}

fn default_server_name() -> String {
    "relayd".to_string()
}
