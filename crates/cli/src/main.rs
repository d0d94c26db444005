//! TravelPay CLI - Main Entry Point
//!
//! Runs the purchase scenarios against the application and manages the
//! suite's database state.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use travelpay_common::{default_config_path, SuiteConfig};

mod commands;
mod output;

use commands::{check, clean, list, run};

/// TravelPay CLI - E2E suite for the tour purchase page
#[derive(Parser)]
#[command(name = "travelpay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Suite configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scenarios against the application
    Run(run::RunArgs),

    /// List scenarios
    List(list::ListArgs),

    /// Delete all payment, credit request and order rows
    Clean,

    /// Check that the application and the database are reachable
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = SuiteConfig::from_env(&config_path)?;
    tracing::debug!(
        "Configuration from {} (app: {}, db: {})",
        config_path.display(),
        config.app.url,
        config.db.url_without_credentials()
    );

    let success = match cli.command {
        Commands::Run(args) => run::execute(args, config, cli.format).await?,
        Commands::List(args) => list::execute(args, &config, cli.format)?,
        Commands::Clean => clean::execute(&config).await?,
        Commands::Check => check::execute(&config).await?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
