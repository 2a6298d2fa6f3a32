//! Turns tool signatures into function descriptors.

use tracing::{debug, warn};

use crate::descriptor::{
    FunctionDescriptor, FunctionDescriptorSet, ParameterDescriptor, Parameters, Properties,
};
use crate::docstring::{self, ParsedDocstring};
use crate::error::{ToolError, ToolResult};
use crate::signature::{GENERIC_TYPE_LABEL, ToolSignature, TypeAnnotation};

/// Builds the descriptor for a single tool.
///
/// Parameters keep declaration order. A parameter without a documented
/// description is described by its own name, and a function without a summary
/// line is described by its own name.
#[must_use]
pub fn extract(signature: &ToolSignature) -> FunctionDescriptor {
    let parsed = docstring::parse(signature.doc().unwrap_or_default());
    let descriptions = parsed.descriptions();

    let mut properties = Properties::new();
    for (name, annotation) in signature.parameters() {
        let type_name = type_label(signature.name(), name, annotation, &parsed);
        let description = descriptions.get(name).copied().unwrap_or(name);
        if !properties.insert(name, ParameterDescriptor::new(type_name, description)) {
            warn!(
                tool = signature.name(),
                parameter = name,
                "parameter name declared twice, keeping the first declaration"
            );
        }
    }

    let known = signature.parameter_names();
    for param in parsed.params() {
        if !known.contains(param.name()) {
            debug!(
                tool = signature.name(),
                parameter = param.name(),
                "documented parameter is not declared"
            );
        }
    }

    let description = parsed
        .summary()
        .filter(|summary| !summary.is_empty())
        .unwrap_or(signature.name());

    debug!(
        tool = signature.name(),
        parameters = properties.len(),
        "extracted function descriptor"
    );

    FunctionDescriptor::new(signature.name(), description, Parameters::new(properties))
}

/// Compiles signatures into a descriptor set, preserving input order.
///
/// An empty input produces an empty `items` list; callers that must not send
/// an empty set use [`compile_required`] or omit the set entirely.
pub fn compile<'a, I>(signatures: I) -> FunctionDescriptorSet
where
    I: IntoIterator<Item = &'a ToolSignature>,
{
    let items: Vec<_> = signatures.into_iter().map(extract).collect();
    debug!(count = items.len(), "compiled function descriptor set");
    FunctionDescriptorSet::new(items)
}

/// Compiles signatures, requiring at least one.
///
/// # Errors
///
/// Returns [`ToolError::EmptyFunctionSet`] when `signatures` is empty.
pub fn compile_required<'a, I>(signatures: I) -> ToolResult<FunctionDescriptorSet>
where
    I: IntoIterator<Item = &'a ToolSignature>,
{
    let set = compile(signatures);
    if set.is_empty() {
        return Err(ToolError::EmptyFunctionSet);
    }
    Ok(set)
}

fn type_label(
    tool: &str,
    parameter: &str,
    annotation: &TypeAnnotation,
    parsed: &ParsedDocstring,
) -> String {
    if let Some(label) = annotation.label() {
        return label.to_owned();
    }

    if matches!(annotation, TypeAnnotation::Missing) {
        if let Some(documented) = parsed.param(parameter).and_then(|param| param.type_name()) {
            return documented.to_owned();
        }
    }

    warn!(
        tool,
        parameter,
        ?annotation,
        "parameter type has no display name, using generic label"
    );
    GENERIC_TYPE_LABEL.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn multiply_numbers() -> ToolSignature {
        ToolSignature::new("multiply_numbers")
            .unwrap()
            .with_doc(
                "Multiply two numbers together

                Args:
                    a (float): first number
                    b (float): second number
                ",
            )
            .with_param("a", "float")
            .unwrap()
            .with_param("b", "float")
            .unwrap()
            .with_return("float")
    }

    fn add_numbers() -> ToolSignature {
        ToolSignature::new("add_numbers")
            .unwrap()
            .with_doc(
                "Add two numbers together

                Args:
                    a: first number
                ",
            )
            .with_param("a", "float")
            .unwrap()
            .with_param("b", "float")
            .unwrap()
            .with_return("float")
    }

    fn subtract_numbers() -> ToolSignature {
        ToolSignature::new("subtract_numbers")
            .unwrap()
            .with_untyped_param("a")
            .unwrap()
            .with_untyped_param("b")
            .unwrap()
            .with_return("float")
    }

    #[test]
    fn extracts_documented_function() {
        let descriptor = extract(&multiply_numbers());

        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "name": "multiply_numbers",
                "description": "Multiply two numbers together",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "a": { "type": "float", "description": "first number" },
                        "b": { "type": "float", "description": "second number" }
                    }
                }
            })
        );
        let keys: Vec<_> = descriptor.properties().keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn undocumented_parameter_falls_back_to_its_name() {
        let descriptor = extract(&add_numbers());

        assert_eq!(descriptor.description(), "Add two numbers together");
        let b = descriptor.properties().get("b").unwrap();
        assert_eq!(b.type_name(), "float");
        assert_eq!(b.description(), "b");
    }

    #[test]
    fn missing_docs_and_annotations_fall_back() {
        let descriptor = extract(&subtract_numbers());

        assert_eq!(descriptor.description(), "subtract_numbers");
        assert_eq!(descriptor.properties().len(), 2);
        for (name, parameter) in descriptor.properties().iter() {
            assert_eq!(parameter.description(), name);
            assert_eq!(parameter.type_name(), GENERIC_TYPE_LABEL);
        }
    }

    #[test]
    fn missing_annotation_uses_documented_type() {
        let signature = ToolSignature::new("greet")
            .unwrap()
            .with_doc("Greet someone.\n\nArgs:\n    who (str): person to greet")
            .with_untyped_param("who")
            .unwrap()
            .with_param("loud", TypeAnnotation::Unresolved("impl Into<bool>".into()))
            .unwrap();

        let descriptor = extract(&signature);
        assert_eq!(descriptor.properties().get("who").unwrap().type_name(), "str");
        assert_eq!(
            descriptor.properties().get("loud").unwrap().type_name(),
            GENERIC_TYPE_LABEL
        );
    }

    #[test]
    fn zero_parameters_yield_empty_properties() {
        let signature = ToolSignature::new("now")
            .unwrap()
            .with_doc("Current time")
            .with_return("str");

        let descriptor = extract(&signature);
        assert!(descriptor.properties().is_empty());
        assert_eq!(
            serde_json::to_value(descriptor.parameters()).unwrap(),
            json!({ "type": "object", "properties": {} })
        );
    }

    #[test]
    fn blank_summary_falls_back_to_name() {
        let signature = ToolSignature::new("noop").unwrap().with_doc("   \n\n");
        assert_eq!(extract(&signature).description(), "noop");
    }

    #[test]
    fn compile_preserves_input_order() {
        let f = multiply_numbers();
        let g = add_numbers();

        let set = compile([&f, &g]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.items(), [extract(&f), extract(&g)]);

        let reversed = compile([&g, &f]);
        assert_eq!(reversed.items()[0].name(), "add_numbers");
    }

    #[test]
    fn compile_empty_yields_empty_items() {
        let set = compile(std::iter::empty());
        assert!(set.is_empty());
        assert_eq!(set.min_items(), 1);
    }

    #[test]
    fn compile_required_rejects_empty_input() {
        let err = compile_required(std::iter::empty()).unwrap_err();
        assert_eq!(err, ToolError::EmptyFunctionSet);

        let f = multiply_numbers();
        assert_eq!(compile_required([&f]).unwrap().len(), 1);
    }

    #[test]
    fn repeated_parameter_keeps_first_declaration() {
        let signature = ToolSignature::from_macro(
            "pair",
            None,
            vec![
                ("arg0", TypeAnnotation::named("i32")),
                ("arg0", TypeAnnotation::named("str")),
            ],
        );
        let descriptor = extract(&signature);

        assert_eq!(descriptor.properties().len(), 1);
        assert_eq!(descriptor.properties().get("arg0").unwrap().type_name(), "i32");
    }

    #[test]
    fn compiled_set_round_trips_through_json() {
        let f = multiply_numbers();
        let g = add_numbers();
        let set = compile([&f, &g]);

        let encoded = serde_json::to_string_pretty(&set).unwrap();
        let decoded: FunctionDescriptorSet = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, set);
        assert_eq!(serde_json::to_string_pretty(&decoded).unwrap(), encoded);
    }
}
