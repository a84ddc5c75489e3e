//! Explain command - show the components behind a cache key

use super::resolve::{fingerprint_manifest, KeyContext};
use crate::cli::args::{KeyArgs, OutputFormat};
use crate::config::Config;
use crate::error::StepkeyResult;
use crate::fingerprint::{Fingerprint, KEY_SCHEME};
use console::style;

/// Execute the explain command
pub async fn execute(args: KeyArgs, config: &Config) -> StepkeyResult<()> {
    let context = KeyContext::resolve(&args.context, config)?;
    let (_, fp) = fingerprint_manifest(&args.manifest, &args.context, &context).await?;

    match args.format {
        OutputFormat::Plain => print_table(&fp),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "scheme": KEY_SCHEME,
                "key": fp.key,
                "components": fp.components,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

fn print_table(fp: &Fingerprint) {
    println!("{:<26} {}", "COMPONENT", "DIGEST");
    println!("{}", "-".repeat(91));

    for component in &fp.components {
        println!("{:<26} {}", component.name, style(&component.digest).dim());
    }

    println!();
    println!("{} {} ({})", style("Key:").bold(), fp.key, KEY_SCHEME);
}
