//! Prints the function-calling schema compiled from a few demo tools.
//!
//! ```text
//! tool-schema schema
//! tool-schema config --model gpt-4 --api-key sk-... "What is 2 + 3?"
//! OAI_CONFIG_LIST=./configs.json tool-schema config "What is 2 + 3?"
//! ```

use agent_config::{ConfigList, OpenAiConfig};
use agent_telemetry::{TelemetryConfig, init_tracing};
use agent_tools::{ToolRegistry, tool};
use agent_wrapper::{AgentOptions, AgentResult, AgentRuntime, ToolAgent};
use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "tool-schema", about = "Compile demo tools into an LLM function schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the compiled function descriptor set.
    Schema,
    /// Print the full LLM config handed to the agent runtime.
    Config {
        /// Opening message of the conversation.
        message: String,
        /// `OpenAI` model identifier; falls back to `OAI_CONFIG_LIST` when omitted.
        #[arg(long)]
        model: Option<String>,
        /// `OpenAI` API key used together with `--model`.
        #[arg(long)]
        api_key: Option<String>,
    },
}

/// Add two numbers together
///
/// Args:
///     a (float): first number
///     b (float): second number
#[tool]
fn add_numbers(a: f64, b: f64) -> f64 {
    a + b
}

/// Multiply two numbers together
///
/// Args:
///     a (float): first number
///     b (float): second number
#[tool]
fn multiply_numbers(a: f64, b: f64) -> f64 {
    a * b
}

/// Report the current weather for a city.
///
/// # Arguments
///
/// * `city` - city name, e.g. "Lisbon"
/// * `unit` - `celsius` or `fahrenheit`
#[tool(name = "get_weather")]
fn weather(city: &str, unit: Option<String>) -> String {
    format!("sunny in {city} ({})", unit.as_deref().unwrap_or("celsius"))
}

fn demo_tools() -> Vec<agent_tools::ToolSignature> {
    vec![
        add_numbers_signature(),
        multiply_numbers_signature(),
        weather_signature(),
    ]
}

/// Runtime that prints the payload it receives instead of calling a model.
struct PrintingAgent {
    options: AgentOptions,
}

#[async_trait]
impl AgentRuntime for PrintingAgent {
    type Outcome = String;

    fn from_options(options: AgentOptions) -> AgentResult<Self> {
        Ok(Self { options })
    }

    async fn initiate_chat(&mut self, message: &str) -> AgentResult<String> {
        info!(agent = self.options.name(), message, "chat initiated");
        serde_json::to_string_pretty(&self.options)
            .map_err(|err| agent_wrapper::AgentError::runtime(err.to_string()))
    }
}

fn backends(model: Option<String>, api_key: Option<String>) -> Result<ConfigList> {
    match (model, api_key) {
        (Some(model), Some(api_key)) => {
            let mut list = ConfigList::new();
            list.push(OpenAiConfig::new(model, api_key)?);
            Ok(list)
        }
        (None, None) => ConfigList::from_env().context("no --model/--api-key given"),
        _ => anyhow::bail!("--model and --api-key must be given together"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&TelemetryConfig::new())?;
    let cli = Cli::parse();

    match cli.command {
        Command::Schema => {
            let mut registry = ToolRegistry::new();
            for signature in demo_tools() {
                registry.register(signature)?;
            }
            println!("{}", serde_json::to_string_pretty(&registry.compile())?);
        }
        Command::Config {
            message,
            model,
            api_key,
        } => {
            let mut agent = ToolAgent::<PrintingAgent>::new("assistant")
                .with_system_message("Answer using the registered tools.")
                .with_backends(backends(model, api_key)?);
            for signature in demo_tools() {
                agent.function(signature)?;
            }
            println!("{}", agent.start_chat(&message).await?);
        }
    }

    info!(
        sum = add_numbers(2.0, 3.0),
        product = multiply_numbers(2.0, 3.0),
        weather = %weather("Lisbon", None),
        "demo tools evaluated"
    );
    Ok(())
}
