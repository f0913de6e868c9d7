//! Error types and handling for the `EcoRoute` application

use thiserror::Error;

/// Main error type for the `EcoRoute` application
#[derive(Error, Debug)]
pub enum EcoRouteError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Failures talking to an external data service (traffic or weather)
    #[error("{service} service error: {message}")]
    Fetch { service: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl EcoRouteError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error for a named external service
    pub fn fetch<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Fetch {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EcoRouteError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            EcoRouteError::Fetch { service, .. } => {
                format!(
                    "Unable to reach the {service} service. Please check your internet connection."
                )
            }
            EcoRouteError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            EcoRouteError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            EcoRouteError::General { message } => message.clone(),
        }
    }
}
