//! Agent wrapper that feeds registered tools to a conversation runtime.
//!
//! [`ToolAgent`] owns the tool registry and backend configuration. When a
//! chat starts it compiles the registered tools once, merges them into an
//! [`LlmConfig`], and hands that payload to any [`AgentRuntime`].

#![warn(missing_docs, clippy::pedantic)]

mod agent;
mod error;
mod llm_config;
mod runtime;

pub use agent::ToolAgent;
pub use error::{AgentError, AgentResult};
pub use llm_config::{DEFAULT_TIMEOUT_SECS, LlmConfig};
pub use runtime::{AgentOptions, AgentRuntime};
