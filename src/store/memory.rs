//! In-memory store.

use super::{EntityRef, EntityStore, Kind};
use crate::error::{Error, Result};
use crate::labels::LabelSet;
use crate::patch::PatchDocument;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// MemoryStore keeps entity labels in memory and applies patches with
/// the same per-key merge the API server uses for `metadata.labels`:
/// set keys are written, `null` keys are deleted, the rest is kept.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entities: BTreeMap<EntityRef, LabelSet>,
    patches: Vec<(EntityRef, PatchDocument)>,
    reads: Vec<EntityRef>,
    reject_patches: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entity.
    pub fn with_entity(self, entity: EntityRef, labels: LabelSet) -> Self {
        self.lock().entities.insert(entity, labels);
        self
    }

    /// Makes every later patch fail with an apply error.
    pub fn rejecting_patches(self, message: impl Into<String>) -> Self {
        self.lock().reject_patches = Some(message.into());
        self
    }

    /// Returns the current labels of an entity, if it exists.
    pub fn labels(&self, entity: &EntityRef) -> Option<LabelSet> {
        self.lock().entities.get(entity).cloned()
    }

    /// Returns the patches applied so far, in order.
    pub fn patches(&self) -> Vec<(EntityRef, PatchDocument)> {
        self.lock().patches.clone()
    }

    /// Returns the entities read so far, in order.
    pub fn reads(&self) -> Vec<EntityRef> {
        self.lock().reads.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get(&self, entity: &EntityRef) -> Result<LabelSet> {
        let mut inner = self.lock();
        inner.reads.push(entity.clone());
        inner
            .entities
            .get(entity)
            .cloned()
            .ok_or_else(|| Error::not_found(entity.kind().as_str(), entity.to_string()))
    }

    async fn patch(&self, pod: &EntityRef, document: &PatchDocument) -> Result<()> {
        let mut inner = self.lock();
        if pod.kind() != Kind::Pod {
            return Err(Error::Apply(format!("cannot patch {} '{}'", pod.kind(), pod)));
        }
        if let Some(message) = &inner.reject_patches {
            return Err(Error::Apply(message.clone()));
        }
        let current = inner
            .entities
            .get(pod)
            .cloned()
            .ok_or_else(|| Error::not_found(pod.kind().as_str(), pod.to_string()))?;

        let mut merged = current.into_inner();
        for k in document.removed() {
            merged.remove(k);
        }
        for (k, v) in document.labels().iter() {
            merged.insert(k.to_string(), v.to_string());
        }
        inner.entities.insert(pod.clone(), LabelSet::from(merged));
        inner.patches.push((pod.clone(), document.clone()));
        Ok(())
    }
}
