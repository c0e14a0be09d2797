mod env_file;
mod messages;
mod oplog;
mod server;
mod slack;
mod telemetry;


pub use env_file::*;
pub use messages::*;
pub use oplog::*;
pub use server::*;
pub use slack::*;
pub use telemetry::*;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the relay, loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    /// Path of the `key=value` secrets file.
    #[serde(default = "default_env_file")]
    pub env_file: String,
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Slack delivery configuration.
    #[serde(default)]
    pub slack: SlackSettings,
    /// Message text configuration.
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Operational error log.
    #[serde(default)]
    pub oplog: OpLogConfig,
    /// Log output.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            server: ServerConfig::default(),
            slack: SlackSettings::default(),
            messages: MessagesConfig::default(),
            oplog: OpLogConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

fn default_env_file() -> String {
    ".env".to_owned()
}

impl RelayConfig {
    /// Load configuration from a TOML file, or use defaults if the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }
}

/// Resolve `path` relative to the directory containing the config file.
pub fn resolve_relative(config_path: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_relative() {
        config_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(path)
    } else {
        Path::new(path).to_path_buf()
    }
}
