//! Configuration management for the `EcoRoute` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::EcoRouteError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `EcoRoute` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcoRouteConfig {
    /// Traffic service configuration
    #[serde(default = "ServiceConfig::traffic_defaults")]
    pub traffic: ServiceConfig,
    /// Weather service configuration
    #[serde(default = "ServiceConfig::weather_defaults")]
    pub weather: ServiceConfig,
    /// Emissions model configuration
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for one external HTTP data service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint URL for the service
    pub endpoint: String,
    /// API key (optional; some providers are key-free)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Emissions model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Baseline emissions in kg CO2 per km before traffic/weather adjustment
    #[serde(default = "default_base_emission_factor")]
    pub base_emission_factor: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_traffic_endpoint() -> String {
    "https://traffic.example.com/v1/flow".to_string()
}

fn default_weather_endpoint() -> String {
    "https://weather.example.com/v1/current".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_emission_factor() -> f64 {
    // Average kg CO2 per km for a passenger car
    0.21
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServiceConfig {
    fn traffic_defaults() -> Self {
        Self {
            endpoint: default_traffic_endpoint(),
            api_key: None,
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }

    fn weather_defaults() -> Self {
        Self {
            endpoint: default_weather_endpoint(),
            api_key: None,
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_emission_factor: default_base_emission_factor(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for EcoRouteConfig {
    fn default() -> Self {
        Self {
            traffic: ServiceConfig::traffic_defaults(),
            weather: ServiceConfig::weather_defaults(),
            scoring: ScoringConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EcoRouteConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with ECOROUTE_ prefix,
        // e.g. ECOROUTE_SCORING__BASE_EMISSION_FACTOR
        builder = builder.add_source(
            Environment::with_prefix("ECOROUTE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: EcoRouteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ecoroute").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        Self::validate_service("traffic", &self.traffic)?;
        Self::validate_service("weather", &self.weather)?;
        self.validate_scoring()?;
        self.validate_logging()?;
        Ok(())
    }

    /// Validate one external service section
    fn validate_service(name: &str, service: &ServiceConfig) -> Result<()> {
        if !service.endpoint.starts_with("http://") && !service.endpoint.starts_with("https://") {
            return Err(EcoRouteError::config(format!(
                "{name} endpoint must be a valid HTTP or HTTPS URL"
            ))
            .into());
        }

        if let Some(api_key) = &service.api_key {
            if api_key.is_empty() {
                return Err(EcoRouteError::config(format!(
                    "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                ))
                .into());
            }

            if api_key.len() < 8 {
                return Err(EcoRouteError::config(format!(
                    "{name} API key appears to be invalid (too short). Please check your API key."
                ))
                .into());
            }

            if api_key.len() > 100 {
                return Err(EcoRouteError::config(format!(
                    "{name} API key appears to be invalid (too long). Please check your API key."
                ))
                .into());
            }
        }

        if service.timeout_seconds == 0 || service.timeout_seconds > 300 {
            return Err(EcoRouteError::config(format!(
                "{name} timeout must be between 1 and 300 seconds"
            ))
            .into());
        }

        if service.max_retries > 10 {
            return Err(
                EcoRouteError::config(format!("{name} max retries cannot exceed 10")).into(),
            );
        }

        Ok(())
    }

    /// Validate emissions model settings
    fn validate_scoring(&self) -> Result<()> {
        let factor = self.scoring.base_emission_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EcoRouteError::config(
                "Base emission factor must be a positive number of kg CO2 per km",
            )
            .into());
        }

        if factor > 10.0 {
            return Err(EcoRouteError::config(
                "Base emission factor cannot exceed 10 kg CO2 per km",
            )
            .into());
        }

        Ok(())
    }

    /// Validate logging settings
    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(EcoRouteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
