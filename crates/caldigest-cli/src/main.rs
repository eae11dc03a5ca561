//! caldigest CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use caldigest_cli::cli::{Cli, Command, ConfigAction};
use caldigest_cli::config::AppConfig;
use caldigest_cli::error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };

    match cli.command {
        Some(Command::Post { date, dry_run }) => {
            caldigest_cli::commands::post::run(&config, date, dry_run).await
        }
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => caldigest_cli::commands::config::dump(&config),
            ConfigAction::Validate => caldigest_cli::commands::config::validate(&config),
            ConfigAction::Path => caldigest_cli::commands::config::path(),
        },
        // Bare `caldigest` is the scheduled production invocation.
        None => caldigest_cli::commands::post::run(&config, None, false).await,
    }
}
