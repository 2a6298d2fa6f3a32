//! Static description of a callable that can be exposed as a tool.

use std::collections::HashSet;

use crate::error::{ToolError, ToolResult};

/// Annotation-table key holding the declared return type.
pub const RETURN_MARKER: &str = "return";

/// Type label used when a parameter's annotation cannot be displayed.
pub const GENERIC_TYPE_LABEL: &str = "Any";

/// Declared type of a single parameter or return value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeAnnotation {
    /// A concrete type with a human-readable display name.
    Named(String),
    /// No annotation was declared.
    Missing,
    /// An annotation exists but has no usable display name.
    Unresolved(String),
}

impl TypeAnnotation {
    /// Creates a named annotation.
    #[must_use]
    pub fn named(label: impl Into<String>) -> Self {
        Self::Named(label.into())
    }

    /// Returns the display name for named annotations.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Named(label) if !label.trim().is_empty() => Some(label),
            _ => None,
        }
    }
}

impl From<&str> for TypeAnnotation {
    fn from(value: &str) -> Self {
        Self::named(value)
    }
}

impl From<String> for TypeAnnotation {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

/// Name, documentation, and ordered annotation table of a tool function.
///
/// The annotation table lists parameters in declaration order. An entry keyed
/// by [`RETURN_MARKER`] carries the return type and is never a parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolSignature {
    name: String,
    doc: Option<String>,
    annotations: Vec<(String, TypeAnnotation)>,
}

impl ToolSignature {
    /// Creates a signature for the supplied function name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidSignature`] if the name is empty.
    pub fn new(name: impl Into<String>) -> ToolResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolError::invalid_signature("tool name cannot be empty"));
        }

        Ok(Self {
            name,
            doc: None,
            annotations: Vec::new(),
        })
    }

    /// Builds a signature whose parts were already checked by `#[tool]`.
    #[doc(hidden)]
    #[must_use]
    pub fn from_macro(
        name: &str,
        doc: Option<&str>,
        annotations: Vec<(&str, TypeAnnotation)>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            doc: doc.map(str::to_owned),
            annotations: annotations
                .into_iter()
                .map(|(name, annotation)| (name.to_owned(), annotation))
                .collect(),
        }
    }

    /// Attaches the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends a parameter to the annotation table.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidSignature`] if the parameter name is empty,
    /// equals [`RETURN_MARKER`], or was already declared.
    pub fn with_param(
        mut self,
        name: impl Into<String>,
        annotation: impl Into<TypeAnnotation>,
    ) -> ToolResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolError::invalid_signature(format!(
                "tool `{}` has a parameter with an empty name",
                self.name
            )));
        }
        if name == RETURN_MARKER {
            return Err(ToolError::invalid_signature(format!(
                "tool `{}` cannot declare a parameter named `{RETURN_MARKER}`",
                self.name
            )));
        }
        if self.annotations.iter().any(|(existing, _)| *existing == name) {
            return Err(ToolError::invalid_signature(format!(
                "tool `{}` declares parameter `{name}` twice",
                self.name
            )));
        }

        // keep the return entry last, as declared
        let at = self
            .annotations
            .iter()
            .position(|(key, _)| key == RETURN_MARKER)
            .unwrap_or(self.annotations.len());
        self.annotations.insert(at, (name, annotation.into()));
        Ok(self)
    }

    /// Appends a parameter without a declared type.
    ///
    /// # Errors
    ///
    /// Same as [`ToolSignature::with_param`].
    pub fn with_untyped_param(self, name: impl Into<String>) -> ToolResult<Self> {
        self.with_param(name, TypeAnnotation::Missing)
    }

    /// Records the return type, replacing any previous one.
    #[must_use]
    pub fn with_return(mut self, annotation: impl Into<TypeAnnotation>) -> Self {
        self.annotations.retain(|(key, _)| key != RETURN_MARKER);
        self.annotations
            .push((RETURN_MARKER.to_owned(), annotation.into()));
        self
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the documentation text, if any.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Returns the full annotation table, including the return entry.
    #[must_use]
    pub fn annotations(&self) -> &[(String, TypeAnnotation)] {
        &self.annotations
    }

    /// Iterates over declared parameters in order, skipping the return entry.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &TypeAnnotation)> {
        self.annotations
            .iter()
            .filter(|(name, _)| name != RETURN_MARKER)
            .map(|(name, annotation)| (name.as_str(), annotation))
    }

    /// Returns the declared return type.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeAnnotation> {
        self.annotations
            .iter()
            .find(|(name, _)| name == RETURN_MARKER)
            .map(|(_, annotation)| annotation)
    }

    pub(crate) fn parameter_names(&self) -> HashSet<&str> {
        self.parameters().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_skip_return_entry() {
        let signature = ToolSignature::new("add")
            .unwrap()
            .with_return("float")
            .with_param("a", "float")
            .unwrap()
            .with_param("b", "float")
            .unwrap();

        let names: Vec<_> = signature.parameters().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(signature.annotations().len(), 3);
        assert_eq!(signature.annotations()[2].0, RETURN_MARKER);
        assert_eq!(signature.return_type(), Some(&TypeAnnotation::named("float")));
    }

    #[test]
    fn with_return_replaces_previous_entry() {
        let signature = ToolSignature::new("f")
            .unwrap()
            .with_return("int")
            .with_return("str");

        assert_eq!(signature.annotations().len(), 1);
        assert_eq!(signature.return_type(), Some(&TypeAnnotation::named("str")));
    }

    #[test]
    fn invalid_signatures_error() {
        let err = ToolSignature::new("  ").expect_err("empty name should error");
        assert!(matches!(err, ToolError::InvalidSignature { .. }));

        let err = ToolSignature::new("f")
            .unwrap()
            .with_param("a", "int")
            .unwrap()
            .with_param("a", "str")
            .expect_err("duplicate parameter should error");
        assert!(matches!(err, ToolError::InvalidSignature { reason } if reason.contains("`a`")));

        let err = ToolSignature::new("f")
            .unwrap()
            .with_param(RETURN_MARKER, "int")
            .expect_err("return marker is reserved");
        assert!(matches!(err, ToolError::InvalidSignature { .. }));
    }

    #[test]
    fn blank_named_annotation_has_no_label() {
        assert_eq!(TypeAnnotation::named(" ").label(), None);
        assert_eq!(TypeAnnotation::Missing.label(), None);
        assert_eq!(TypeAnnotation::named("int").label(), Some("int"));
    }
}
