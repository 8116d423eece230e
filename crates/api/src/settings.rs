//! Service configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `EVBI__<SECTION>__<KEY>` environment variables.

use config::{Config, Environment, File};
use inference_engine::ModelPaths;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "ev-battery-intel.toml";

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "EVBI_CONFIG";

const ENV_PREFIX: &str = "EVBI";

/// Errors while assembling configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Listen address
    pub addr: String,
    /// Expose Prometheus metrics at `/metrics`
    pub metrics_enabled: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
    pub format: LogFormat,
}

impl LoggingSettings {
    pub fn max_level(&self) -> Result<Level, SettingsError> {
        self.level
            .parse::<Level>()
            .map_err(|_| SettingsError::InvalidLogLevel(self.level.clone()))
    }
}

/// Full service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub models: ModelPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                addr: "0.0.0.0:8080".to_string(),
                metrics_enabled: true,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                format: LogFormat::Text,
            },
            models: ModelPaths::default(),
        }
    }
}

impl Settings {
    /// Load settings. `path` overrides `EVBI_CONFIG`, which overrides
    /// [`DEFAULT_CONFIG_FILE`]. A missing file is not an error.
    pub fn load(path: Option<&str>) -> Result<Self, SettingsError> {
        let file = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(&file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.logging.max_level()?;
        Ok(settings)
    }
}
