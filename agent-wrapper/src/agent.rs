//! Tool-aware wrapper around an agent runtime.

use std::fmt;

use agent_config::{BackendConfig, ConfigList};
use agent_tools::{ToolRegistry, ToolSignature};
use tracing::info;

use crate::error::{AgentError, AgentResult};
use crate::llm_config::{DEFAULT_TIMEOUT_SECS, LlmConfig};
use crate::runtime::{AgentOptions, AgentRuntime};

/// Holds registered tools and backend configs for one runtime agent.
///
/// Registration needs `&mut self`; the wrapper is meant to be configured by a
/// single owner before any chat starts.
pub struct ToolAgent<A>
where
    A: AgentRuntime,
{
    name: String,
    system_message: String,
    tools: ToolRegistry,
    backends: ConfigList,
    timeout: u64,
    agent: Option<A>,
}

impl<A> fmt::Debug for ToolAgent<A>
where
    A: AgentRuntime,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolAgent")
            .field("name", &self.name)
            .field("tools", &self.tools)
            .field("backends", &self.backends.len())
            .field("timeout", &self.timeout)
            .field("started", &self.agent.is_some())
            .finish()
    }
}

impl<A> ToolAgent<A>
where
    A: AgentRuntime,
{
    /// Creates a wrapper with no tools, no backends, and an empty system message.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_message: String::new(),
            tools: ToolRegistry::new(),
            backends: ConfigList::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
            agent: None,
        }
    }

    /// Sets the system message.
    #[must_use]
    pub fn with_system_message(mut self, message: impl Into<String>) -> Self {
        self.set_system_message(message);
        self
    }

    /// Replaces the system message.
    pub fn set_system_message(&mut self, message: impl Into<String>) {
        self.system_message = message.into();
    }

    /// Appends a backend configuration.
    #[must_use]
    pub fn with_backend(mut self, config: impl Into<BackendConfig>) -> Self {
        self.backends.push(config);
        self
    }

    /// Appends every configuration in `list`, keeping order.
    #[must_use]
    pub fn with_backends(mut self, list: ConfigList) -> Self {
        for config in list.as_slice() {
            self.backends.push(config.clone());
        }
        self
    }

    /// Overrides the request timeout passed to the backend client.
    #[must_use]
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Registers a tool.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Tool`] wrapping
    /// [`ToolError::DuplicateTool`](agent_tools::ToolError::DuplicateTool) if a
    /// tool with the same name is already registered; nothing is added.
    pub fn function(&mut self, signature: ToolSignature) -> AgentResult<&ToolSignature> {
        Ok(self.tools.register(signature)?)
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

    /// Returns the registered tools.
    #[must_use]
    pub fn functions(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Returns the backend configurations.
    #[must_use]
    pub fn backends(&self) -> &ConfigList {
        &self.backends
    }

    /// Compiles the registered tools into a fresh payload.
    #[must_use]
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig::new(self.tools.compile(), self.backends.clone()).with_timeout(self.timeout)
    }

    /// Returns the runtime agent built by the last successful
    /// [`ToolAgent::start_chat`], or `None` if the last attempt failed.
    #[must_use]
    pub fn agent(&self) -> Option<&A> {
        self.agent.as_ref()
    }

    /// Builds the runtime agent and starts a conversation.
    ///
    /// Tools are compiled exactly once per call.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MissingBackend`] when no backend is configured, or
    /// propagates errors from the runtime.
    pub async fn start_chat(&mut self, message: &str) -> AgentResult<A::Outcome> {
        if self.backends.is_empty() {
            return Err(AgentError::MissingBackend {
                agent: self.name.clone(),
            });
        }

        let llm_config = self.llm_config();
        info!(
            agent = %self.name,
            tools = self.tools.len(),
            backends = self.backends.len(),
            "starting chat"
        );

        self.agent = None;
        let options = AgentOptions::new(&self.name, &self.system_message, llm_config);
        let agent = self.agent.insert(A::from_options(options)?);
        agent.initiate_chat(message).await
    }
}
