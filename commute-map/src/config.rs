//! Application configuration.
//!
//! Read from a TOML file (`config.toml` in the working directory unless
//! `COMMUTE_MAP_CONFIG` points elsewhere).

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::directions::EfaConfig;
use crate::domain::StationId;
use crate::stations::Encoding;
use crate::survey::{DispatchConfig, MissingDestinationPolicy};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "COMMUTE_MAP_CONFIG";

/// Errors loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The values are inconsistent
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which directions service to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionsMode {
    /// Live EFA API.
    #[default]
    Efa,
    /// Recorded journeys from `fixture_path`.
    Fixture,
}

/// Directions service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectionsSettings {
    pub mode: DirectionsMode,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub fixture_path: Option<PathBuf>,
}

impl Default for DirectionsSettings {
    fn default() -> Self {
        Self {
            mode: DirectionsMode::default(),
            base_url: None,
            timeout_secs: 30,
            fixture_path: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path of the semicolon-delimited station export.
    pub station_data_path: PathBuf,

    #[serde(default)]
    pub station_data_encoding: Encoding,

    /// Stations in any of these fare zones are used as origins.
    pub fare_zones: Vec<String>,

    /// Destination station identifiers, in output order.
    pub destination_stations: Vec<StationId>,

    /// Departure date and time of every query (`YYYY-MM-DDTHH:MM:SS`).
    pub trip_date: NaiveDateTime,

    pub json_data_path: PathBuf,

    pub js_data_path: PathBuf,

    #[serde(default)]
    pub missing_destination: MissingDestinationPolicy,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    #[serde(default)]
    pub directions: DirectionsSettings,
}

impl AppConfig {
    /// Load and validate the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.destination_stations.is_empty() {
            return Err(ConfigError::Invalid(
                "destination_stations must not be empty".to_string(),
            ));
        }

        if self.fare_zones.is_empty() {
            return Err(ConfigError::Invalid(
                "fare_zones must not be empty".to_string(),
            ));
        }

        if self.directions.mode == DirectionsMode::Fixture
            && self.directions.fixture_path.is_none()
        {
            return Err(ConfigError::Invalid(
                "directions.fixture_path is required when directions.mode = \"fixture\""
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Client settings for the live directions service.
    ///
    /// The client-side request cap follows the dispatch concurrency.
    pub fn efa_config(&self) -> EfaConfig {
        let mut config = EfaConfig::new()
            .with_max_concurrent(self.dispatch.effective_concurrency())
            .with_timeout(self.directions.timeout_secs);

        if let Some(url) = &self.directions.base_url {
            config = config.with_base_url(url);
        }

        config
    }
}

/// Resolve the configuration path from the environment.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
