//! Search Adapter Main Entry Point
//!
//! Runs a single search adapter operation from the command line and prints
//! its normalized result as JSON on stdout. Logs go to stderr.

use std::env;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use search_adapter::cli::{execute, is_ok, Cli};
use search_adapter::AppError;
use search_adapter_repository::{OpenSearchProvider, SearchAdapterConfig, SearchIndexService};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_adapter=info,search_adapter_repository=info"));

    let json_logs = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| AppError::config(format!("failed to initialize tracing: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .pretty(),
            )
            .try_init()
            .map_err(|e| AppError::config(format!("failed to initialize tracing: {}", e)))?;
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<bool, AppError> {
    let config = SearchAdapterConfig::from_env()?;
    let provider = OpenSearchProvider::new(&config)?;
    let service = SearchIndexService::new(Box::new(provider));

    let rendered = execute(&service, cli.command).await?;
    println!("{}", rendered);

    Ok(is_ok(&rendered))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    info!(
        service_name = "search-adapter",
        service_version = env!("CARGO_PKG_VERSION"),
        "Starting search adapter"
    );

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Search adapter failed");
            ExitCode::FAILURE
        }
    }
}
