//! Observability utilities for agents.
//!
//! Library crates only emit `tracing` events; binaries call [`init_tracing`]
//! once at startup to install a formatted subscriber filtered by `RUST_LOG`.

#![warn(missing_docs, clippy::pedantic)]

use anyhow::{Result, anyhow};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Subscriber settings.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    default_directive: String,
    with_target: bool,
    ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_directive: DEFAULT_DIRECTIVE.to_owned(),
            with_target: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the fallback filter directive, e.g. `"agent_tools=debug"`.
    #[must_use]
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Includes event targets in the output.
    #[must_use]
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Enables or disables ANSI colours.
    #[must_use]
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Returns the fallback filter directive.
    #[must_use]
    pub fn default_directive(&self) -> &str {
        &self.default_directive
    }

    /// Builds the filter: `RUST_LOG` when valid, otherwise the fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback directive cannot be parsed.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.default_directive))
            .map_err(|err| anyhow!("invalid log directive `{}`: {err}", self.default_directive))
    }
}

/// Installs the global formatted subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    debug!(directive = config.default_directive(), "tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info() {
        let config = TelemetryConfig::new();
        assert_eq!(config.default_directive(), DEFAULT_DIRECTIVE);
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn custom_directive_is_kept() {
        let config = TelemetryConfig::new()
            .with_default_directive("agent_tools=debug")
            .with_target(true)
            .with_ansi(false);
        assert_eq!(config.default_directive(), "agent_tools=debug");
        assert!(config.with_target);
        assert!(!config.ansi);
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig::new().with_ansi(false);
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_err());
    }
}
