//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::{ListenConfig, WebSocketConfig};
use super::oper::OperConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server identity.
    pub server: ServerConfig,
    /// ADMIN reply contents.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Plain TCP listener.
    pub listen: ListenConfig,
    /// Optional WebSocket listener for the JSON event transport.
    pub websocket: Option<WebSocketConfig>,
    /// Operator credentials.
    #[serde(default)]
    pub oper: OperConfig,
    /// Message of the Day.
    #[serde(default)]
    pub motd: MotdConfig,
    /// Protocol limits and timers.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.example.org"), the prefix of every numeric.
    pub name: String,
    /// Network name shown in the welcome line.
    #[serde(default = "default_network")]
    pub network: String,
    /// INFO reply lines.
    #[serde(default)]
    pub info: Vec<String>,
    /// Free-form comments appended to the VERSION reply.
    #[serde(default)]
    pub comments: String,
}

fn default_network() -> String {
    "dualirc".to_string()
}

/// ADMIN block (RPL_ADMINLOC1, RPL_ADMINLOC2, RPL_ADMINEMAIL).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub location1: String,
    #[serde(default)]
    pub location2: String,
    #[serde(default)]
    pub email: String,
}

/// Message of the Day configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MotdConfig {
    /// Path to the MOTD file, read each time MOTD is served.
    pub file: Option<PathBuf>,
}
