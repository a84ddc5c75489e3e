//! Configuration schema for Stepkey
//!
//! Configuration is stored at `~/.config/stepkey/config.toml`

use crate::store::StoreDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Default artifact store
    pub store: StoreConfig,

    /// Default project
    pub project: ProjectConfig,
}

impl Config {
    /// Check values that parse fine but can never be used.
    /// Returns the offending setting and the reason.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.store.path {
            if path.trim().is_empty() {
                return Err("store.path must not be empty; remove it to require --store-path".into());
            }
        }
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format for stderr diagnostics
    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
        }
    }
}

/// Stderr log rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Artifact store used when no `--store-*` flags are given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Unique store identifier
    pub id: Option<Uuid>,

    /// Root path or URI of the store
    pub path: Option<String>,
}

impl StoreConfig {
    /// Build a descriptor, letting explicit values win over configured ones
    pub fn resolve(&self, id: Option<Uuid>, path: Option<String>) -> Option<StoreDescriptor> {
        let id = id.or(self.id)?;
        Some(StoreDescriptor {
            id,
            path: path.or_else(|| self.path.clone()),
        })
    }
}

/// Project used when `--project` is not given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub id: Option<Uuid>,
}
