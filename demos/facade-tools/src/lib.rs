//! Calculator tools declared through the `fastagents` facade without a direct
//! `agent-tools` dependency.

use fastagents::tool;
use fastagents::tools::ToolRegistry;

/// Multiply two numbers together
///
/// # Arguments
///
/// * `a` - first number
/// * `b` - second number
#[fastagents::tool]
pub fn multiply_numbers(a: f64, b: f64) -> f64 {
    a * b
}

/// Divide the first number by the second.
#[tool(name = "divide")]
pub fn quotient(a: f64, b: f64) -> f64 {
    a / b
}

/// Registry holding every calculator tool.
///
/// # Errors
///
/// Fails only if two tools share a name.
pub fn calculator() -> fastagents::tools::ToolResult<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(multiply_numbers_signature())?;
    registry.register(quotient_signature())?;
    Ok(registry)
}
