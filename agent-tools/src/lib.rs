//! Function descriptor compilation and tool registration.
//!
//! Ordinary Rust functions are described by a [`ToolSignature`], either built
//! by hand or emitted by the [`tool`] attribute. The compiler turns a list of
//! signatures into the JSON schema an LLM function-calling interface expects,
//! and the [`ToolRegistry`] guarantees registered names stay unique.

#![warn(missing_docs, clippy::pedantic)]

extern crate self as agent_tools;

mod compiler;
pub mod descriptor;
pub mod docstring;
mod error;
pub mod registry;
mod signature;

/// Attribute that emits a `<fn>_signature()` constructor for a tool function.
pub use agent_tools_macros::tool;

pub use compiler::{compile, compile_required, extract};
pub use descriptor::{
    FUNCTION_SET_DESCRIPTION, FunctionDescriptor, FunctionDescriptorSet, ParameterDescriptor,
    Parameters, Properties,
};
pub use error::{ToolError, ToolResult};
pub use registry::ToolRegistry;
pub use signature::{GENERIC_TYPE_LABEL, RETURN_MARKER, ToolSignature, TypeAnnotation};
