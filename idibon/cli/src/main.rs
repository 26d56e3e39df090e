//! Idibon CLI - command-line access to the Idibon annotation API

mod commands;
mod error;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use idibon::config::API_KEY_ENV;
use idibon::{ClientConfig, ConfigError, IdibonClient};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "idibon", version)]
#[command(about = "Command-line client for the Idibon annotation API", long_about = None)]
struct Cli {
    /// API key used for basic authentication
    #[arg(long, env = "IDIBON_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API host
    #[arg(long, env = "IDIBON_API_URL", global = true)]
    url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    timeout_ms: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,idibon=info,idibon_cli=info".to_string(),
            2 => "info,idibon=debug,idibon_cli=debug".to_string(),
            _ => "debug,idibon=trace,idibon_cli=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn build_client(cli: &Cli) -> Result<IdibonClient, CliError> {
    let api_key = cli
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            CliError::Usage(format!(
                "{}; pass --api-key",
                ConfigError::MissingApiKey { env_var: API_KEY_ENV }
            ))
        })?;

    let config = ClientConfig::from_env().map_err(idibon::ApiError::from)?;
    let mut builder = IdibonClient::builder(api_key).config(config);
    if let Some(url) = &cli.url {
        builder = builder.base_url(url)?;
    }
    if let Some(ms) = cli.timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    let result = match build_client(&cli) {
        Ok(client) => cli.command.run(&client).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
