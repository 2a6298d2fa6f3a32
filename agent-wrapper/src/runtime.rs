//! Capability required from the underlying conversation runtime.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AgentResult;
use crate::llm_config::LlmConfig;

/// Keyword configuration used to construct a runtime agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentOptions {
    name: String,
    system_message: String,
    llm_config: LlmConfig,
}

impl AgentOptions {
    /// Bundles the construction parameters.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        system_message: impl Into<String>,
        llm_config: LlmConfig,
    ) -> Self {
        Self {
            name: name.into(),
            system_message: system_message.into(),
            llm_config,
        }
    }

    /// Returns the agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the system message.
    #[must_use]
    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    /// Returns the LLM configuration payload.
    #[must_use]
    pub fn llm_config(&self) -> &LlmConfig {
        &self.llm_config
    }

    /// Consumes the options, returning the LLM configuration payload.
    #[must_use]
    pub fn into_llm_config(self) -> LlmConfig {
        self.llm_config
    }
}

/// Agent runtime that can be built from [`AgentOptions`] and start a
/// conversation.
#[async_trait]
pub trait AgentRuntime: Sized + Send {
    /// Result of a finished conversation.
    type Outcome: Send;

    /// Constructs the runtime agent.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the options are unusable.
    fn from_options(options: AgentOptions) -> AgentResult<Self>;

    /// Starts a conversation with the supplied opening message.
    ///
    /// # Errors
    ///
    /// Implementations return [`AgentError::Runtime`](crate::AgentError::Runtime)
    /// when the conversation fails.
    async fn initiate_chat(&mut self, message: &str) -> AgentResult<Self::Outcome>;
}
