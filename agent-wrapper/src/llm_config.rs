//! Payload merged into the underlying agent's configuration.

use agent_config::ConfigList;
use agent_tools::FunctionDescriptorSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Default request timeout, in seconds, passed through to the backend client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn non_empty_functions<'de, D>(deserializer: D) -> Result<Option<FunctionDescriptorSet>, D::Error>
where
    D: Deserializer<'de>,
{
    let functions = Option::<FunctionDescriptorSet>::deserialize(deserializer)?;
    Ok(functions.filter(|set| !set.is_empty()))
}

/// Tool schema, backend list, and timeout handed to an agent runtime.
///
/// `functions` is omitted from the JSON form when no tools are registered so
/// the backend never receives an empty set that requires `minItems: 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(
        default,
        deserialize_with = "non_empty_functions",
        skip_serializing_if = "Option::is_none"
    )]
    functions: Option<FunctionDescriptorSet>,
    config_list: ConfigList,
    #[serde(default = "default_timeout")]
    timeout: u64,
}

impl LlmConfig {
    /// Creates a config with the default timeout. An empty descriptor set is
    /// dropped.
    #[must_use]
    pub fn new(functions: FunctionDescriptorSet, config_list: ConfigList) -> Self {
        Self {
            functions: (!functions.is_empty()).then_some(functions),
            config_list,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Overrides the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the compiled tool schema, if any tools are registered.
    #[must_use]
    pub fn functions(&self) -> Option<&FunctionDescriptorSet> {
        self.functions.as_ref()
    }

    /// Returns the backend configurations.
    #[must_use]
    pub fn config_list(&self) -> &ConfigList {
        &self.config_list
    }

    /// Returns the timeout in seconds.
    #[must_use]
    pub const fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Encodes the payload as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
