//! Error types for algoviz.
//!
//! Trace generators never fail: malformed algorithm input becomes a
//! one-step trace carrying an explanatory message. `VizError` only covers
//! the ambient surfaces around the engine (configuration, the catalogue,
//! parameter binding and export).

use thiserror::Error;

/// Result type alias for algoviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all algoviz operations.
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Catalogue Errors =====
    /// No algorithm is registered under this id.
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// A parameter binding could not be applied.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter key as given by the caller.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this error was caused by user-supplied input rather than the environment.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownAlgorithm(_) | Self::InvalidParameter { .. }
        )
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
