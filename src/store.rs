//! Artifact store identity
//!
//! The key generator only ever asks a store for two things: its unique id and
//! where it currently keeps data. The path matters on its own because a store
//! can be pointed at a new location without changing its id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the backend that will persist a step's outputs
pub trait ArtifactStore: Send + Sync {
    /// Stable unique identifier of the store
    fn id(&self) -> Uuid;

    /// Current root path or location, if configured
    fn path(&self) -> Option<&str>;
}

/// Plain value describing an artifact store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDescriptor {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl StoreDescriptor {
    pub fn new(id: Uuid, path: impl Into<String>) -> Self {
        Self {
            id,
            path: Some(path.into()),
        }
    }

    /// A store whose location is unknown; keys cannot be computed against it
    pub fn without_path(id: Uuid) -> Self {
        Self { id, path: None }
    }
}

impl ArtifactStore for StoreDescriptor {
    fn id(&self) -> Uuid {
        self.id
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}
