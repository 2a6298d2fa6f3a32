//! Loading ordered lists of backend configurations.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::BackendConfig;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable holding a config list, inline or as a file path.
pub const CONFIG_LIST_ENV: &str = "OAI_CONFIG_LIST";

/// Ordered list of backend configurations; the first entry is preferred.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigList(Vec<BackendConfig>);

impl ConfigList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON array of backend configs, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed or any entry
    /// fails validation.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let list: Self = serde_json::from_str(json)?;
        debug!(count = list.len(), "decoded backend config list");
        Ok(list)
    }

    /// Reads and decodes a JSON config list file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any error of
    /// [`ConfigList::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading backend config list");
        Self::from_json_str(&contents)
    }

    /// Loads the list named by [`CONFIG_LIST_ENV`].
    ///
    /// # Errors
    ///
    /// See [`ConfigList::from_env_var`].
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_var(CONFIG_LIST_ENV)
    }

    /// Loads the list named by the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if the variable is unset, or any
    /// error of [`ConfigList::from_value`].
    pub fn from_env_var(var: &str) -> ConfigResult<Self> {
        let value = env::var(var).map_err(|_| ConfigError::MissingEnv {
            var: var.to_owned(),
        })?;
        Self::from_value(&value)
    }

    /// Interprets `value` as inline JSON when it starts with `[`, otherwise as
    /// a path to a JSON file.
    ///
    /// # Errors
    ///
    /// Propagates decoding and I/O failures.
    pub fn from_value(value: &str) -> ConfigResult<Self> {
        let trimmed = value.trim();
        if trimmed.starts_with('[') {
            Self::from_json_str(trimmed)
        } else {
            Self::from_path(trimmed)
        }
    }

    /// Appends a configuration.
    pub fn push(&mut self, config: impl Into<BackendConfig>) {
        self.0.push(config.into());
    }

    /// Number of configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over configurations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, BackendConfig> {
        self.0.iter()
    }

    /// Returns the configurations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[BackendConfig] {
        &self.0
    }
}

impl From<Vec<BackendConfig>> for ConfigList {
    fn from(value: Vec<BackendConfig>) -> Self {
        Self(value)
    }
}

impl FromIterator<BackendConfig> for ConfigList {
    fn from_iter<T: IntoIterator<Item = BackendConfig>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ConfigList {
    type Item = &'a BackendConfig;
    type IntoIter = std::slice::Iter<'a, BackendConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
