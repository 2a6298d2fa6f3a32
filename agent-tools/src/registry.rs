//! Ordered registry of tool signatures keyed by name.

use std::collections::HashMap;
use std::fmt;

use tracing::info;

use crate::compiler;
use crate::descriptor::FunctionDescriptorSet;
use crate::error::{ToolError, ToolResult};
use crate::signature::ToolSignature;

/// Registry that stores tool signatures in registration order.
///
/// Registration takes `&mut self`; compiling only reads, so any number of
/// readers may compile concurrently once registration is finished.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSignature>,
    index: HashMap<String, usize>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("registered", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool signature and returns a reference to the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if the name is already present. The
    /// registry is left unchanged in that case.
    pub fn register(&mut self, signature: ToolSignature) -> ToolResult<&ToolSignature> {
        let name = signature.name().to_owned();
        if self.index.contains_key(&name) {
            return Err(ToolError::DuplicateTool { name });
        }

        let position = self.tools.len();
        info!(tool = %name, position, "registered tool");
        self.index.insert(name, position);
        self.tools.push(signature);
        Ok(&self.tools[position])
    }

    /// Returns the signature registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSignature> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Returns `true` if a tool called `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterates over signatures in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ToolSignature> {
        self.tools.iter()
    }

    /// Iterates over tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(ToolSignature::name)
    }

    /// Compiles every registered tool into a descriptor set.
    #[must_use]
    pub fn compile(&self) -> FunctionDescriptorSet {
        compiler::compile(&self.tools)
    }
}

impl<'a> IntoIterator for &'a ToolRegistry {
    type Item = &'a ToolSignature;
    type IntoIter = std::slice::Iter<'a, ToolSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
