//! Stepkey - deterministic cache keys for pipeline steps
//!
//! Decides whether a previously computed step result may be reused by
//! reducing the resolved step, its input artifacts, the artifact store and
//! the project to a single key.
//!
//! ```rust,ignore
//! use stepkey::{generate_cache_key, OutputSpec, ResolvedStep, StoreDescriptor};
//!
//! let step = ResolvedStep::new("pkg.mod.func@v1")
//!     .with_parameter("x", serde_json::json!(1))
//!     .with_output("out1", OutputSpec::new("builtin.StringMaterializer"));
//! let inputs = HashMap::from([("in1".to_string(), artifact_id)]);
//! let store = StoreDescriptor::new(store_id, "/data");
//!
//! let key = generate_cache_key(&step, &inputs, &store, project_id)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod step;
pub mod store;

pub use error::{StepkeyError, StepkeyResult};
pub use fingerprint::{fingerprint, generate_cache_key, CacheKey, Component, Fingerprint, KEY_SCHEME};
pub use step::{OutputSpec, ResolvedStep, StepManifest};
pub use store::{ArtifactStore, StoreDescriptor};
