//! Merge-patch document carrying pod labels.

use crate::error::Result;
use crate::labels::LabelSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// PatchDocument is `{"metadata": {"labels": {...}}}`.
///
/// Applied as a merge patch, the labels it carries are set on the pod and
/// every removed key is sent as `null`, which deletes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchDocument {
    pub metadata: PatchMetadata,
}

/// PatchMetadata is the `metadata` field of a [`PatchDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireMetadata", into = "WireMetadata")]
pub struct PatchMetadata {
    pub labels: LabelSet,
    /// Keys deleted from the pod. Never overlaps `labels`.
    pub removed: BTreeSet<String>,
}

#[derive(Serialize, Deserialize)]
struct WireMetadata {
    labels: BTreeMap<String, Option<String>>,
}

impl From<PatchMetadata> for WireMetadata {
    fn from(meta: PatchMetadata) -> Self {
        let mut labels: BTreeMap<String, Option<String>> = meta
            .removed
            .into_iter()
            .map(|k| (k, None))
            .collect();
        labels.extend(meta.labels.into_inner().into_iter().map(|(k, v)| (k, Some(v))));
        WireMetadata { labels }
    }
}

impl From<WireMetadata> for PatchMetadata {
    fn from(wire: WireMetadata) -> Self {
        let mut labels = BTreeMap::new();
        let mut removed = BTreeSet::new();
        for (k, v) in wire.labels {
            match v {
                Some(v) => {
                    labels.insert(k, v);
                }
                None => {
                    removed.insert(k);
                }
            }
        }
        PatchMetadata {
            labels: LabelSet::from(labels),
            removed,
        }
    }
}

impl PatchDocument {
    /// Returns the labels the document sets.
    pub fn labels(&self) -> &LabelSet {
        &self.metadata.labels
    }

    /// Returns the keys the document deletes.
    pub fn removed(&self) -> &BTreeSet<String> {
        &self.metadata.removed
    }

    /// Also deletes every key of `current` the document does not set.
    pub fn removing_others(mut self, current: &LabelSet) -> Self {
        self.metadata.removed = current
            .keys()
            .filter(|k| !self.metadata.labels.contains_key(k))
            .map(str::to_string)
            .collect();
        self
    }

    /// Encodes the document as JSON, the wire format of the patch.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the document as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Decodes a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Wraps `target` into a patch document.
pub fn build(target: LabelSet) -> PatchDocument {
    PatchDocument {
        metadata: PatchMetadata {
            labels: target,
            removed: BTreeSet::new(),
        },
    }
}
