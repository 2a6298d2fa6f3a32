//! Error definitions for tool signatures, registration, and schema decoding.

use thiserror::Error;

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors produced while describing, registering, or compiling tools.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    /// Tool signature failed validation.
    #[error("invalid tool signature: {reason}")]
    InvalidSignature {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Tool name collided with an existing registration.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },

    /// A descriptor set with at least one item was required but none exist.
    #[error("at least one tool must be registered to build a function set")]
    EmptyFunctionSet,

    /// Decoded schema did not match the fixed descriptor envelope.
    #[error("invalid function schema: {reason}")]
    InvalidSchema {
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl ToolError {
    /// Creates a signature validation error from the supplied reason.
    #[must_use]
    pub fn invalid_signature(reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            reason: reason.into(),
        }
    }

    /// Creates a schema decoding error from the supplied reason.
    #[must_use]
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }
}
