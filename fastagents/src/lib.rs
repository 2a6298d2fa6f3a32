//! Facade over the fastagents crates.
//!
//! Depend on this crate to register Rust functions as LLM tools, compile them
//! into a function-calling schema, and hand that schema together with
//! validated backend configuration to an agent runtime. Optional components
//! sit behind feature flags.

#![warn(missing_docs, clippy::pedantic)]

/// Function descriptor compiler, `#[tool]` attribute, and tool registry.
pub use agent_tools as tools;

/// Backend configuration and config-list loading (enabled by `config` feature).
#[cfg(feature = "config")]
pub use agent_config as config;

/// Agent wrapper and runtime capability (enabled by `wrapper` feature).
#[cfg(feature = "wrapper")]
pub use agent_wrapper as wrapper;

/// Tracing bootstrap (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use agent_telemetry as telemetry;

pub use agent_tools::{ToolSignature, compile, extract, tool};
