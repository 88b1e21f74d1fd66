use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use guardrail::config::Config;
use guardrail::error::ValidatorError;
use guardrail::llm_response::LlmResponse;
use guardrail::validators::{DataType, Metadata, OnFail, ValidatorRegistry};

/// Guardrail: output validators for language-model responses.
#[derive(Parser)]
#[command(name = "guardrail", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a piece of text or the output of a model response
    Validate {
        /// Text to validate (omit when using --response)
        text: Option<String>,

        /// JSON file holding an LLM response; its `output` is validated
        #[arg(long, conflicts_with = "text")]
        response: Option<PathBuf>,

        /// Registered validator to run
        #[arg(long, default_value = "is-profanity-free")]
        validator: String,

        /// What to do on failure: exception, fix, filter or noop
        /// (default: GUARDRAIL_ON_FAIL, else exception)
        #[arg(long, value_enum)]
        on_fail: Option<OnFail>,

        /// Print the result as JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// List registered validators
    List,

    /// Download the ONNX profanity model (~126 MB)
    DownloadModel,

    /// Show model and lexicon status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("guardrail=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            text,
            response,
            validator,
            on_fail,
            json,
        } => {
            let config = Config::load()?;
            let policy = on_fail.unwrap_or(config.on_fail);

            let value = match (text, response) {
                (_, Some(path)) => load_response(&path)?.output().to_string(),
                (Some(text), None) => text,
                (None, None) => {
                    anyhow::bail!("Nothing to validate. Pass TEXT or --response <FILE>.")
                }
            };

            let registry = ValidatorRegistry::with_builtins();
            let validator = registry.build(&validator, DataType::String, &config)?;

            info!(validator = validator.name(), "Running validator");
            let result = validator.validate(&value, &Metadata::new())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                guardrail::output::terminal::display_result(validator.name(), &value, &result);
            }

            match policy.apply(&value, result) {
                Ok(resolved) => {
                    if !json {
                        guardrail::output::terminal::display_resolved(policy, &resolved);
                    }
                }
                Err(ValidatorError::ValidationFailed(message)) => {
                    if !json {
                        eprintln!("{} {}", "Error:".red().bold(), message);
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::List => {
            let registry = ValidatorRegistry::with_builtins();
            guardrail::output::terminal::display_registry(&registry.entries());
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading ONNX model...");
            println!("  Destination: {}", model_dir.display());

            guardrail::profanity::download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `guardrail validate \"some text\"`.");
        }

        Commands::Status => {
            let config = Config::load()?;
            guardrail::status::show(&config)?;
        }
    }

    Ok(())
}

/// Read an LLM response record from a JSON file.
fn load_response(path: &Path) -> Result<LlmResponse> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid LLM response", path.display()))
}
