//! Stepkey - deterministic cache keys for pipeline steps
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use stepkey::cli::{Cli, Commands};
use stepkey::config::{ConfigManager, LogFormat};
use stepkey::error::StepkeyResult;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> StepkeyResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    // Config subcommands load (or rewrite) the file themselves
    if let Commands::Config(args) = cli.command {
        init_logging(cli.verbose, LogFormat::default());
        return stepkey::cli::commands::config(args, &config_manager).await;
    }

    let config = config_manager.load().await?;

    init_logging(cli.verbose, config.general.log_format);
    debug!("Using config: {}", config_manager.path().display());

    match cli.command {
        Commands::Key(args) => stepkey::cli::commands::key(args, &config).await,
        Commands::Explain(args) => stepkey::cli::commands::explain(args, &config).await,
        Commands::Diff(args) => stepkey::cli::commands::diff(args, &config).await,
        Commands::Config(_) => unreachable!("Config handled above"),
    }
}

/// Logging goes to stderr so stdout only ever carries command output.
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace; RUST_LOG takes precedence.
fn init_logging(verbose: u8, log_format: LogFormat) {
    let level = match verbose {
        0 => "stepkey=warn",
        1 => "stepkey=info",
        2 => "stepkey=debug",
        _ => "stepkey=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init(),
    }
}
