//! restbridge command-line front end
//!
//! Usage:
//!   restbridge ask -q "get the weather for Paris"   Run one broker session
//!   restbridge serve                                Serve the tool catalog over stdio

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use restbridge_core::config::{BrokerSettings, CatalogCommand, ConfigProvider, FileConfigProvider};
use restbridge_core::logging::Logger;
use restbridge_core::secrets::{EnvSecretStore, SecretStore};
use restbridge_core::{Broker, ChildProcessConnector, GenaiBackend, RestCatalogServer, TracingLogger};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "restbridge")]
#[command(version)]
#[command(about = "Let a language model answer a question or call a REST API for it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question; the model may call a REST API to answer it.
    Ask {
        /// The question. Read from stdin when omitted.
        #[arg(short, long)]
        question: Option<String>,

        /// Model name, overriding the config file.
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature, overriding the config file.
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Path to a YAML config file (default: ~/.config/restbridge/config.yaml).
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Serve the REST tool catalog over stdio.
    Serve,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the MCP channel under `serve`, so logs always go to stderr
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask {
            question,
            model,
            temperature,
            config,
        } => cmd_ask(question, model, temperature, config).await,
        Commands::Serve => cmd_serve().await,
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_ask(
    question: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
    config: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(config, model, temperature)?;
    let api_key = resolve_api_key(&settings)?;

    let question = match question {
        Some(question) => question,
        None => read_question().await?,
    };
    if question.trim().is_empty() {
        bail!("No question provided");
    }

    let catalog = match settings.catalog.clone() {
        Some(command) => command,
        None => CatalogCommand::current_exe().context("failed to locate the restbridge executable")?,
    };
    debug!(program = %catalog.program, args = ?catalog.args, "catalog command");

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
    let connector = ChildProcessConnector::new(catalog, Arc::clone(&logger));
    let backend = GenaiBackend::new(Some(api_key), Arc::clone(&logger));
    let broker = Broker::from_settings(&settings, Arc::new(connector), Arc::new(backend), logger);

    info!(model = %settings.model, temperature = settings.temperature, "starting session");
    match broker.execute(&question).await {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(failure) => {
            if let Some(header) = &failure.header {
                println!("{}", header);
            }
            Err(failure.error.into())
        }
    }
}

async fn cmd_serve() -> Result<()> {
    let server = RestCatalogServer::new(Arc::new(TracingLogger::with_component("catalog")));
    server
        .serve_stdio()
        .await
        .context("tool catalog server failed")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Config file values, with command-line flags taking precedence
fn load_settings(
    config: Option<PathBuf>,
    model: Option<String>,
    temperature: Option<f64>,
) -> Result<BrokerSettings> {
    let provider = match config {
        Some(path) => FileConfigProvider::new(path),
        None => FileConfigProvider::user(),
    };
    let mut settings = provider
        .load()
        .with_context(|| format!("failed to load config from {}", provider.path().display()))?;

    if let Some(model) = model {
        settings = settings.with_model(model);
    }
    if let Some(temperature) = temperature {
        settings = settings.with_temperature(temperature);
    }
    Ok(settings)
}

/// The configured key variable, then the gemini aliases
fn resolve_api_key(settings: &BrokerSettings) -> Result<String> {
    let store = EnvSecretStore::new();
    match store
        .get(&settings.api_key_env)
        .or_else(|| store.get("gemini"))
    {
        Some(key) => Ok(key),
        None => bail!("{} environment variable not set", settings.api_key_env),
    }
}

async fn read_question() -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter your question: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read question from stdin")?;
    Ok(strip_line_ending(&line).to_string())
}

/// Drop the newline `read_line` keeps, leaving the rest of the input as typed
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}
