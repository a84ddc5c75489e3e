//! Cache key generation for pipeline steps
//!
//! A cache key identifies everything that can change what a step produces or
//! where its outputs land. Two calls return the same key if and only if all
//! of the following are identical:
//!
//! | # | Component | Encoding |
//! |---|-----------|----------|
//! | 0 | `scheme` | scheme tag, currently `stepkey/v1` |
//! | 1 | `project_id` | 16 raw UUID bytes |
//! | 2 | `artifact_store.id` | 16 raw UUID bytes |
//! | 3 | `artifact_store.path` | UTF-8 path |
//! | 4 | `step.source` | UTF-8 source reference |
//! | 5 | `step.parameters` | sorted map, canonical JSON values |
//! | 6 | `input_artifact_ids` | sorted map, 16 raw UUID bytes per value |
//! | 7 | `step.outputs` | sorted map, canonical JSON descriptors |
//! | 8 | `step.caching_parameters` | sorted map, canonical JSON values |
//!
//! Each component is framed (see [`frame`]) and the final key is the SHA-256
//! of the framed `(name, component)` sequence in the order above. Changing
//! the hash, the framing or the order requires a new [`KEY_SCHEME`], which
//! invalidates every existing cache entry.

pub mod canonical;
mod frame;

use crate::error::{StepkeyError, StepkeyResult};
use crate::step::ResolvedStep;
use crate::store::ArtifactStore;
use canonical::{sorted_entries, to_canonical_json};
use frame::FrameWriter;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};
use uuid::Uuid;

/// Versioned identifier of the hashing scheme
pub const KEY_SCHEME: &str = "stepkey/v1";

/// Digest length in bytes
pub const KEY_LEN: usize = 32;

/// Opaque, fixed-length cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey([u8; KEY_LEN]);

impl CacheKey {
    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// First 12 hex chars, for log lines
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for CacheKey {
    type Err = StepkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; KEY_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| {
            StepkeyError::invalid_input("cache_key", format!("expected 64 hex chars: {e}"))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for CacheKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CacheKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One named input to the key, reduced to its own digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: &'static str,
    /// SHA-256 (hex) of the framed component bytes
    pub digest: String,
}

/// A cache key together with the per-component digests it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingerprint {
    pub key: CacheKey,
    pub components: Vec<Component>,
}

impl Fingerprint {
    /// Names of the components that differ between two fingerprints
    pub fn diff(&self, other: &Fingerprint) -> Vec<&'static str> {
        self.components
            .iter()
            .zip(&other.components)
            .filter(|(a, b)| a.digest != b.digest)
            .map(|(a, _)| a.name)
            .collect()
    }
}

/// Generate the cache key for one step execution.
///
/// Pure and synchronous: it reads its arguments and nothing else, so it can
/// be called concurrently on shared inputs.
pub fn generate_cache_key<S>(
    step: &ResolvedStep,
    input_artifact_ids: &HashMap<String, Uuid>,
    artifact_store: &S,
    project_id: Uuid,
) -> StepkeyResult<CacheKey>
where
    S: ArtifactStore + ?Sized,
{
    fingerprint(step, input_artifact_ids, artifact_store, project_id).map(|fp| fp.key)
}

/// Same as [`generate_cache_key`] but keeps the per-component breakdown
pub fn fingerprint<S>(
    step: &ResolvedStep,
    input_artifact_ids: &HashMap<String, Uuid>,
    artifact_store: &S,
    project_id: Uuid,
) -> StepkeyResult<Fingerprint>
where
    S: ArtifactStore + ?Sized,
{
    step.validate()?;

    let store_path = artifact_store
        .path()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| {
            StepkeyError::invalid_input("artifact_store.path", "artifact store has no path")
        })?;

    let parts: [(&'static str, Vec<u8>); 9] = [
        ("scheme", single(KEY_SCHEME.as_bytes())),
        ("project_id", single(project_id.as_bytes())),
        ("artifact_store.id", single(artifact_store.id().as_bytes())),
        ("artifact_store.path", single(store_path.as_bytes())),
        ("step.source", single(step.source.as_bytes())),
        ("step.parameters", json_map(&step.parameters)),
        ("input_artifact_ids", artifact_map(input_artifact_ids)),
        ("step.outputs", output_map(step)),
        ("step.caching_parameters", json_map(&step.caching_parameters)),
    ];

    let mut hasher = Sha256::new();
    let mut components = Vec::with_capacity(parts.len());

    for (name, bytes) in parts {
        let mut framed = FrameWriter::new();
        framed.put(name.as_bytes()).put(&bytes);
        hasher.update(framed.into_bytes());

        let digest = hex::encode(Sha256::digest(&bytes));
        trace!(component = name, digest = %digest, "fingerprint component");
        components.push(Component { name, digest });
    }

    let key = CacheKey(hasher.finalize().into());
    debug!(
        step = %step.name,
        key = %key.short(),
        inputs = input_artifact_ids.len(),
        "computed cache key"
    );

    Ok(Fingerprint { key, components })
}

fn single(bytes: &[u8]) -> Vec<u8> {
    let mut w = FrameWriter::new();
    w.put(bytes);
    w.into_bytes()
}

fn json_map(map: &HashMap<String, serde_json::Value>) -> Vec<u8> {
    let mut w = FrameWriter::new();
    w.put_entries(
        sorted_entries(map)
            .into_iter()
            .map(|(k, v)| (k, to_canonical_json(v).into_bytes())),
    );
    w.into_bytes()
}

fn artifact_map(map: &HashMap<String, Uuid>) -> Vec<u8> {
    let mut w = FrameWriter::new();
    w.put_entries(
        sorted_entries(map)
            .into_iter()
            .map(|(k, id)| (k, id.as_bytes().to_vec())),
    );
    w.into_bytes()
}

/// Named descriptor fields and `extra` sit at separate levels, so an extra
/// entry can never stand in for `materializer` or `data_type`.
fn output_map(step: &ResolvedStep) -> Vec<u8> {
    let encoded: Vec<(&str, Vec<u8>)> = sorted_entries(&step.outputs)
        .into_iter()
        .map(|(name, spec)| {
            let descriptor = json!({
                "materializer": spec.materializer,
                "data_type": spec.data_type,
                "extra": spec.extra,
            });
            (name, to_canonical_json(&descriptor).into_bytes())
        })
        .collect();

    let mut w = FrameWriter::new();
    w.put_entries(encoded.into_iter());
    w.into_bytes()
}
