//! Key command - print the cache key for a step manifest

use super::resolve::{fingerprint_manifest, KeyContext};
use crate::cli::args::{KeyArgs, OutputFormat};
use crate::config::Config;
use crate::error::StepkeyResult;
use crate::fingerprint::KEY_SCHEME;
use tracing::info;

/// Execute the key command
pub async fn execute(args: KeyArgs, config: &Config) -> StepkeyResult<()> {
    let context = KeyContext::resolve(&args.context, config)?;
    let (manifest, fp) = fingerprint_manifest(&args.manifest, &args.context, &context).await?;

    info!(step = %manifest.step.name, key = %fp.key.short(), "cache key ready");

    match args.format {
        OutputFormat::Plain => println!("{}", fp.key),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "key": fp.key,
                "scheme": KEY_SCHEME,
                "step": manifest.step.name,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
