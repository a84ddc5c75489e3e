//! Diff command - explain why two steps do or do not share a cache entry

use super::resolve::{fingerprint_manifest, KeyContext};
use crate::cli::args::{DiffArgs, OutputFormat};
use crate::config::Config;
use crate::error::StepkeyResult;
use console::style;

/// Execute the diff command
pub async fn execute(args: DiffArgs, config: &Config) -> StepkeyResult<()> {
    let context = KeyContext::resolve(&args.context, config)?;
    let (_, left) = fingerprint_manifest(&args.left, &args.context, &context).await?;
    let (_, right) = fingerprint_manifest(&args.right, &args.context, &context).await?;

    let changed = left.diff(&right);

    match args.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "left": left.key,
                "right": right.key,
                "changed": changed,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Plain if changed.is_empty() => {
            println!("{} Keys match: {}", style("✓").green(), left.key);
        }
        OutputFormat::Plain => {
            println!("{} Keys differ", style("✗").red());
            println!("  {} {}", style("left: ").dim(), left.key);
            println!("  {} {}", style("right:").dim(), right.key);
            println!();
            println!("Changed components:");
            for name in changed {
                println!("  {} {}", style("•").red(), name);
            }
        }
    }

    Ok(())
}
