//! CLI argument definitions using clap derive

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

/// Stepkey - deterministic cache keys for pipeline steps
///
/// Computes the key under which a step's result may be reused, given the
/// resolved step, its input artifacts, the artifact store and the project.
#[derive(Parser, Debug)]
#[command(name = "stepkey")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STEPKEY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the cache key for a step manifest
    Key(KeyArgs),

    /// Show every fingerprint component behind a cache key
    Explain(KeyArgs),

    /// Show which components differ between two step manifests
    Diff(DiffArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Store, project and input bindings shared by key-producing commands
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Input artifact binding (NAME=UUID), repeatable; overrides the manifest
    #[arg(short, long = "input", value_parser = parse_input)]
    pub inputs: Vec<(String, Uuid)>,

    /// Artifact store id (default: [store] id from config)
    #[arg(long)]
    pub store_id: Option<Uuid>,

    /// Artifact store path (default: [store] path from config)
    #[arg(long)]
    pub store_path: Option<String>,

    /// Project id (default: [project] id from config)
    #[arg(short, long)]
    pub project: Option<Uuid>,
}

/// Arguments for the key and explain commands
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Step manifest (.toml or .json)
    pub manifest: PathBuf,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the diff command
#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// First step manifest
    pub left: PathBuf,

    /// Second step manifest
    pub right: PathBuf,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for key-producing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Plain,
    /// JSON output
    Json,
}

/// Parse an input binding in NAME=UUID format
fn parse_input(s: &str) -> Result<(String, Uuid), String> {
    let (name, id) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid NAME=UUID format: no '=' found in '{s}'"))?;
    if name.is_empty() {
        return Err(format!("invalid NAME=UUID format: empty name in '{s}'"));
    }
    let id = Uuid::parse_str(id).map_err(|e| format!("invalid artifact id '{id}': {e}"))?;
    Ok((name.to_string(), id))
}
