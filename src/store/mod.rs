//! Store module - Reading and patching labels in the orchestration API.
//!
//! [`EntityStore`] is the seam between the pure label logic and the
//! cluster. [`KubeStore`] talks to a real API server; [`MemoryStore`]
//! keeps entities in memory.

mod cluster;
mod memory;

pub use cluster::*;
pub use memory::*;

use crate::error::Result;
use crate::labels::LabelSet;
use crate::patch::PatchDocument;
use async_trait::async_trait;
use std::fmt;

/// Kind of entity labels are read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Node,
    Pod,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Node => "node",
            Kind::Pod => "pod",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// EntityRef identifies a node, or a pod within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityRef {
    Node { name: String },
    Pod { namespace: String, name: String },
}

impl EntityRef {
    /// Refers to a cluster-scoped node.
    pub fn node(name: impl Into<String>) -> Self {
        EntityRef::Node { name: name.into() }
    }

    /// Refers to a pod in `namespace`.
    pub fn pod(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        EntityRef::Pod {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            EntityRef::Node { .. } => Kind::Node,
            EntityRef::Pod { .. } => Kind::Pod,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EntityRef::Node { name } | EntityRef::Pod { name, .. } => name,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Node { name } => f.write_str(name),
            EntityRef::Pod { namespace, name } => write!(f, "{}/{}", namespace, name),
        }
    }
}

/// EntityStore reads entity labels and applies label patches.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fetches the current labels of an entity.
    async fn get(&self, entity: &EntityRef) -> Result<LabelSet>;

    /// Applies `document` to a pod as a merge patch.
    async fn patch(&self, pod: &EntityRef, document: &PatchDocument) -> Result<()>;
}
