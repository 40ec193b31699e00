//! Service Configuration
//!
//! Layered with the `config` crate: built-in defaults, an optional TOML file,
//! `SUMMARIZE_ALERT__*` environment variables, and finally the port handed
//! over by the serverless host in `FUNCTIONS_CUSTOMHANDLER_PORT`.

use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::ConfigError;

/// Default config file location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/summarize-alert.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_VAR: &str = "SUMMARIZE_ALERT_CONFIG";

/// Port assigned by the custom handler host
pub const HOST_PORT_VAR: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

/// Prefix of overriding environment variables
pub const ENV_PREFIX: &str = "SUMMARIZE_ALERT";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 127.0.0.1)
    pub bind_address: String,
    /// Listen port (default: 3000)
    pub port: u16,
    /// Largest accepted request body in bytes (default: 64 KiB)
    pub max_body_bytes: usize,
    /// Path of the summarize function (default: /api/Summarize-alert)
    pub route: String,
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            max_body_bytes: 64 * 1024,
            route: "/api/Summarize-alert".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Name as written in config files
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: info)
    pub level: String,
    /// Output format (default: pretty)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let host_port = env::var(HOST_PORT_VAR).ok();

        Self::from_sources(
            File::with_name(&path).required(false),
            Self::environment(),
            host_port.as_deref(),
        )
    }

    /// `SUMMARIZE_ALERT__<SECTION>__<KEY>` variables of the process
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    /// Load from explicit file and environment sources and host port
    pub fn from_sources<F>(
        file: F,
        environment: Environment,
        host_port: Option<&str>,
    ) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let defaults = Self::default();

        let host_port = host_port
            .map(|raw| {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: HOST_PORT_VAR,
                        reason: format!("{raw:?}: {e}"),
                    })
            })
            .transpose()?;

        let config: ServiceConfig = Config::builder()
            .set_default("server.bind_address", defaults.server.bind_address)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.max_body_bytes", defaults.server.max_body_bytes as i64)?
            .set_default("server.route", defaults.server.route)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format.as_str())?
            .add_source(file)
            .add_source(environment)
            .set_override_option("server.port", host_port.map(i64::from))?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port",
                reason: "must be non-zero".to_string(),
            });
        }
        if !self.server.route.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "server.route",
                reason: format!("{:?} must start with '/'", self.server.route),
            });
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_body_bytes",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
