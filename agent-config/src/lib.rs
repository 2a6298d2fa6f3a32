//! Backend configuration for model providers.
//!
//! A [`BackendConfig`] carries the connection parameters of one provider and
//! is validated once, when it is constructed or decoded. Lists of configs can
//! be loaded from JSON via the [`loader`] module.

#![warn(missing_docs, clippy::pedantic)]

mod backend;
mod error;
pub mod loader;

pub use backend::{AzureApiVersion, AzureConfig, BackendConfig, OpenAiConfig};
pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_LIST_ENV, ConfigList};
