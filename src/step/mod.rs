//! Resolved step definitions
//!
//! A `ResolvedStep` is what the pipeline compiler hands over once every
//! parameter and output has been settled. It is never mutated afterwards;
//! the builder methods below consume and return a new value.

pub mod manifest;

pub use manifest::{ManifestFormat, StepManifest};

use crate::error::{StepkeyError, StepkeyResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Marker of a source reference the compiler has not substituted yet
const PLACEHOLDER_OPEN: &str = "${";

/// Descriptor fields that `OutputSpec::extra` must not repeat
const RESERVED_OUTPUT_FIELDS: [&str; 2] = ["materializer", "data_type"];

/// One compiled pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStep {
    /// Display name, used in logs only (not part of the key)
    #[serde(default)]
    pub name: String,

    /// Code reference plus version marker, e.g. `pkg.mod.func@v1`
    pub source: String,

    #[serde(default)]
    pub parameters: HashMap<String, Value>,

    #[serde(default)]
    pub outputs: HashMap<String, OutputSpec>,

    /// User-declared values the step's result depends on (file hashes, ...)
    #[serde(default)]
    pub caching_parameters: HashMap<String, Value>,
}

/// How one output is materialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Reference to the materializer that writes this output
    pub materializer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// Any further descriptor fields; hashed along with the rest
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutputSpec {
    pub fn new(materializer: impl Into<String>) -> Self {
        Self {
            materializer: materializer.into(),
            data_type: None,
            extra: Map::new(),
        }
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl ResolvedStep {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            source: source.into(),
            parameters: HashMap::new(),
            outputs: HashMap::new(),
            caching_parameters: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn without_parameter(mut self, key: &str) -> Self {
        self.parameters.remove(key);
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, spec: OutputSpec) -> Self {
        self.outputs.insert(name.into(), spec);
        self
    }

    pub fn without_output(mut self, name: &str) -> Self {
        self.outputs.remove(name);
        self
    }

    pub fn with_caching_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.caching_parameters.insert(key.into(), value);
        self
    }

    pub fn without_caching_parameter(mut self, key: &str) -> Self {
        self.caching_parameters.remove(key);
        self
    }

    /// Reject definitions that are clearly not fully resolved
    pub fn validate(&self) -> StepkeyResult<()> {
        if self.source.trim().is_empty() {
            return Err(StepkeyError::invalid_input("step.source", "source is empty"));
        }
        // Parameter values are user data and may legitimately contain `${`
        if self.source.contains(PLACEHOLDER_OPEN) {
            return Err(StepkeyError::invalid_input(
                "step.source",
                "contains an unresolved ${...} placeholder",
            ));
        }

        for (name, spec) in &self.outputs {
            if spec.materializer.trim().is_empty() {
                return Err(StepkeyError::invalid_input(
                    format!("step.outputs.{name}"),
                    "output has no materializer",
                ));
            }
            if let Some(field) = RESERVED_OUTPUT_FIELDS
                .iter()
                .find(|field| spec.extra.contains_key(**field))
            {
                return Err(StepkeyError::invalid_input(
                    format!("step.outputs.{name}"),
                    format!("extra descriptor field '{field}' shadows the named field"),
                ));
            }
        }

        Ok(())
    }
}
