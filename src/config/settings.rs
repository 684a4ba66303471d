//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use crate::utils::errors::{CampusEventsError, Result};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; empty disables file output
    pub file_path: String,
    pub json: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// Restrict the browse view to followed organizers when the user follows any
    pub follow_filter: bool,
    pub trending: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Environment keys use a double underscore between sections,
    /// e.g. `CAMPUS_EVENTS_API__BASE_URL`.
    pub fn new() -> std::result::Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Load settings from an explicit file (falls back to `config.toml` when `None`)
    pub fn load(path: Option<&str>) -> std::result::Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_seconds", defaults.api.timeout_seconds)?
            .set_default("api.user_agent", defaults.api.user_agent)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.file_path", defaults.logging.file_path)?
            .set_default("logging.json", defaults.logging.json)?
            .set_default("features.follow_filter", defaults.features.follow_filter)?
            .set_default("features.trending", defaults.features.trending)?
            .add_source(config::File::with_name(path.unwrap_or("config")).required(path.is_some()))
            .add_source(
                config::Environment::with_prefix("CAMPUS_EVENTS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    /// Render the settings as a TOML document
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CampusEventsError::Config(e.to_string()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api/".to_string(),
                timeout_seconds: 10,
                user_agent: format!("CampusEvents/{}", env!("CARGO_PKG_VERSION")),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: String::new(),
                json: false,
            },
            features: FeaturesConfig {
                follow_filter: true,
                trending: true,
            },
        }
    }
}
