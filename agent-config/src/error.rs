//! Error definitions for backend configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building or loading backend configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field failed validation.
    #[error("validation error for {config}: field `{field}`: {reason}")]
    Validation {
        /// Configuration type being validated.
        config: &'static str,
        /// Offending field name.
        field: &'static str,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The configuration document was not valid JSON or did not match the schema.
    #[error("failed to parse backend configuration: {source}")]
    Parse {
        /// Underlying decoding error.
        #[from]
        source: serde_json::Error,
    },

    /// A configuration file could not be read.
    #[error("failed to read backend configuration from {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The expected environment variable is not set.
    #[error("environment variable `{var}` is not set")]
    MissingEnv {
        /// Name of the variable.
        var: String,
    },
}

impl ConfigError {
    /// Convenience constructor for field validation failures.
    #[must_use]
    pub fn validation(config: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            config,
            field,
            reason: reason.into(),
        }
    }

    /// Returns the offending field for validation failures.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
