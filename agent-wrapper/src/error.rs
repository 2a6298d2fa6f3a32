use agent_config::ConfigError;
use agent_tools::ToolError;
use thiserror::Error;

/// Result alias for agent wrapper operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors surfaced by the agent wrapper.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Tool registration or compilation failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Backend configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A chat was started without any backend configuration.
    #[error("agent `{agent}` has no backend configuration")]
    MissingBackend {
        /// Name of the agent.
        agent: String,
    },

    /// The underlying runtime failed.
    #[error("agent runtime error: {reason}")]
    Runtime {
        /// Human-readable context provided by the runtime.
        reason: String,
    },
}

impl AgentError {
    /// Convenience helper to construct runtime errors.
    #[must_use]
    pub fn runtime(reason: impl Into<String>) -> Self {
        Self::Runtime {
            reason: reason.into(),
        }
    }
}
