use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parley::{ChatRequest, GatewayConfig, build_gateway};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "parley", version, about = "Chat gateway for OpenRouter-compatible model providers")]
struct Cli {
    /// Verbose logging; overrides OPENROUTER_DEBUG.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one message and print the result as JSON.
    Ask {
        message: String,
        #[arg(long, short)]
        model: Option<String>,
    },
    /// List the models this gateway may forward to.
    Models,
    /// Report whether a model is allowed.
    Check { model: String },
    /// Print the effective configuration without secrets.
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = GatewayConfig::from_env().context("failed to read configuration")?;
    if cli.debug {
        config = config.with_debug(true);
    }

    init_tracing(config.debug_enabled);
    config.validate().context("invalid configuration")?;

    match cli.command {
        Command::Ask { message, model } => ask(&config, message, model).await,
        Command::Models => {
            let registry = config.registry();
            print_json(&json!({
                "default": registry.default_model(),
                "models": registry.allowed_models(),
            }))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { model } => {
            let available = config.registry().is_available(&model);
            print_json(&json!({ "model": model, "available": available }))?;
            Ok(if available {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Config => {
            println!("{}", config.summary());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn ask(config: &GatewayConfig, message: String, model: Option<String>) -> Result<ExitCode> {
    let gateway = build_gateway(config).context("failed to build chat gateway")?;
    let cancel = CancellationToken::new();

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling request");
            interrupt.cancel();
        }
    });

    let mut request = ChatRequest::new(message);
    if let Some(model) = model {
        request = request.with_model(model);
    }

    let result = gateway.handle_with_cancel(request, &cancel).await;
    print_json(&result)?;

    Ok(match result.error_kind() {
        None => ExitCode::SUCCESS,
        Some(kind) if kind.is_client_error() => ExitCode::from(2),
        Some(_) => ExitCode::FAILURE,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
