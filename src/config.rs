//! Application configuration
//!
//! Layered: built-in defaults, then the JSON config file, then environment
//! variables. Command-line flags are applied last by the CLI.
//!
//! Every key in the file is optional:
//!
//! ```json
//! { "server": { "host": "0.0.0.0", "port": 4000, "corsOrigins": [] },
//!   "schemaPath": null,
//!   "log": { "level": "info", "format": "pretty" } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::LogConfig;

/// Environment variable overriding the bind port
pub const ENV_PORT: &str = "PORT";
/// Environment variable overriding the bind host
pub const ENV_HOST: &str = "HOST";
/// Environment variable pointing at a schema file
pub const ENV_SCHEMA: &str = "FORMBASE_SCHEMA";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Schema file; the built-in schema is used when absent
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file without consulting the environment.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Applies `PORT`, `HOST` and `FORMBASE_SCHEMA` through `lookup`.
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = var(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be a port number, got '{}'", ENV_PORT, port))
            })?;
        }
        if let Some(host) = var(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(schema) = var(ENV_SCHEMA) {
            self.schema_path = Some(PathBuf::from(schema));
        }
        Ok(())
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".into()));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log.level must not be empty".into()));
        }
        Ok(())
    }
}
