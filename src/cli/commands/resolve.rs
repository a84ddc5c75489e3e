//! Shared resolution of manifest, store, project and inputs

use crate::cli::args::ContextArgs;
use crate::config::Config;
use crate::error::{StepkeyError, StepkeyResult};
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::step::StepManifest;
use crate::store::StoreDescriptor;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Everything besides the step that goes into a key
#[derive(Debug, Clone)]
pub(crate) struct KeyContext {
    pub store: StoreDescriptor,
    pub project: Uuid,
}

impl KeyContext {
    /// Combine command-line flags with configured defaults (flags win)
    pub(crate) fn resolve(args: &ContextArgs, config: &Config) -> StepkeyResult<Self> {
        let store = config
            .store
            .resolve(args.store_id, args.store_path.clone())
            .ok_or_else(|| {
                StepkeyError::invalid_input("artifact_store.id", "no artifact store id given")
            })?;

        let project = args.project.or(config.project.id).ok_or_else(|| {
            StepkeyError::invalid_input("project_id", "no project id given")
        })?;

        Ok(Self { store, project })
    }
}

/// Load a manifest and fingerprint it within the given context
pub(crate) async fn fingerprint_manifest(
    path: &Path,
    args: &ContextArgs,
    context: &KeyContext,
) -> StepkeyResult<(StepManifest, Fingerprint)> {
    let manifest = StepManifest::from_file(path).await?;
    let inputs = bind_inputs(&manifest.inputs, &args.inputs);
    debug!(
        "Fingerprinting {} with {} input(s)",
        path.display(),
        inputs.len()
    );

    let fp = fingerprint(&manifest.step, &inputs, &context.store, context.project)?;
    Ok((manifest, fp))
}

/// Manifest bindings overridden by explicit `--input` flags
fn bind_inputs(manifest: &HashMap<String, Uuid>, flags: &[(String, Uuid)]) -> HashMap<String, Uuid> {
    let mut inputs = manifest.clone();
    inputs.extend(flags.iter().cloned());
    inputs
}
