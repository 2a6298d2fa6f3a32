//! Schema types sent to a model backend's function-calling interface.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ToolError;

/// Fixed description carried by every [`FunctionDescriptorSet`].
pub const FUNCTION_SET_DESCRIPTION: &str =
    "A list of functions the model may generate JSON inputs for.";

/// Type and description of one function parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    #[serde(rename = "type")]
    type_name: String,
    description: String,
}

impl ParameterDescriptor {
    /// Creates a parameter descriptor.
    #[must_use]
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
        }
    }

    /// Returns the display name of the declared type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the parameter description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Parameter descriptors keyed by name, in declaration order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties(Vec<(String, ParameterDescriptor)>);

impl Properties {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor, returning `false` if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: ParameterDescriptor) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.0.push((name, descriptor));
        true
    }

    /// Returns the descriptor registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, descriptor)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterDescriptor)> {
        self.0
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Iterates over parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, descriptor) in &self.0 {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to descriptors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut properties = Properties::new();
                while let Some((name, descriptor)) =
                    access.next_entry::<String, ParameterDescriptor>()?
                {
                    if properties.get(&name).is_some() {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate parameter `{name}`"
                        )));
                    }
                    properties.0.push((name, descriptor));
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
enum ObjectType {
    #[default]
    #[serde(rename = "object")]
    Object,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
enum ArrayType {
    #[default]
    #[serde(rename = "array")]
    Array,
}

/// JSON-schema object wrapper around the parameter mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "type")]
    kind: ObjectType,
    properties: Properties,
}

impl Parameters {
    /// Wraps the supplied properties.
    #[must_use]
    pub fn new(properties: Properties) -> Self {
        Self {
            kind: ObjectType::Object,
            properties,
        }
    }

    /// Returns the parameter mapping.
    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// Schema fragment describing one callable tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    name: String,
    description: String,
    parameters: Parameters,
}

impl FunctionDescriptor {
    /// Creates a function descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Parameters,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the function description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameter schema.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Shorthand for `parameters().properties()`.
    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.parameters.properties
    }
}

/// Envelope wrapping every registered function descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFunctionDescriptorSet")]
pub struct FunctionDescriptorSet {
    description: String,
    #[serde(rename = "type")]
    kind: ArrayType,
    #[serde(rename = "minItems")]
    min_items: u32,
    items: Vec<FunctionDescriptor>,
}

impl FunctionDescriptorSet {
    /// Wraps descriptors in the fixed envelope, keeping their order.
    #[must_use]
    pub fn new(items: Vec<FunctionDescriptor>) -> Self {
        Self {
            description: FUNCTION_SET_DESCRIPTION.to_owned(),
            kind: ArrayType::Array,
            min_items: 1,
            items,
        }
    }

    /// Returns the envelope description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared minimum item count.
    #[must_use]
    pub const fn min_items(&self) -> u32 {
        self.min_items
    }

    /// Returns the descriptors in registration order.
    #[must_use]
    pub fn items(&self) -> &[FunctionDescriptor] {
        &self.items
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no descriptors are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Deserialize)]
struct RawFunctionDescriptorSet {
    description: String,
    #[serde(rename = "type")]
    kind: ArrayType,
    #[serde(rename = "minItems")]
    min_items: u32,
    items: Vec<FunctionDescriptor>,
}

impl TryFrom<RawFunctionDescriptorSet> for FunctionDescriptorSet {
    type Error = ToolError;

    fn try_from(raw: RawFunctionDescriptorSet) -> Result<Self, Self::Error> {
        if raw.description != FUNCTION_SET_DESCRIPTION {
            return Err(ToolError::invalid_schema(format!(
                "unexpected function set description `{}`",
                raw.description
            )));
        }
        if raw.min_items != 1 {
            return Err(ToolError::invalid_schema(format!(
                "minItems must be 1, found {}",
                raw.min_items
            )));
        }

        Ok(Self {
            description: raw.description,
            kind: raw.kind,
            min_items: raw.min_items,
            items: raw.items,
        })
    }
}
