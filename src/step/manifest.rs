//! Step manifest parsing
//!
//! A manifest is a resolved step written to disk, optionally with the
//! artifact ids bound to its inputs:
//!
//! ```toml
//! [step]
//! name = "trainer"
//! source = "pipelines.train.trainer@3f2a9c"
//!
//! [step.parameters]
//! epochs = 10
//!
//! [step.outputs.model]
//! materializer = "builtin.PickleMaterializer"
//!
//! [inputs]
//! dataset = "67e55044-10b1-426f-9247-bb680e5fe0c8"
//! ```
//!
//! The same structure is accepted as JSON for `.json` files.

use super::ResolvedStep;
use crate::error::{StepkeyError, StepkeyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// On-disk encoding of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from the file extension (TOML unless `.json`)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Parsed step manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepManifest {
    pub step: ResolvedStep,

    /// Input name to artifact id
    #[serde(default)]
    pub inputs: HashMap<String, Uuid>,
}

impl StepManifest {
    /// Parse a manifest file from disk
    pub async fn from_file(path: &Path) -> StepkeyResult<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            StepkeyError::io(format!("reading step manifest {}", path.display()), e)
        })?;
        Self::parse_at(path, &content, ManifestFormat::from_path(path))
    }

    /// Parse a manifest from an in-memory string
    pub fn parse(content: &str, format: ManifestFormat) -> StepkeyResult<Self> {
        Self::parse_at(Path::new("<inline>"), content, format)
    }

    fn parse_at(path: &Path, content: &str, format: ManifestFormat) -> StepkeyResult<Self> {
        let invalid = |reason: String| StepkeyError::ManifestInvalid {
            path: PathBuf::from(path),
            reason,
        };

        let manifest: Self = match format {
            ManifestFormat::Toml => toml::from_str(content).map_err(|e| invalid(e.to_string()))?,
            ManifestFormat::Json => {
                serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?
            }
        };

        manifest.step.validate()?;
        Ok(manifest)
    }
}
