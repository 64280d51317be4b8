//! How much of the computed label set goes into the patch.

use super::document::{build, PatchDocument};
use crate::labels::LabelSet;
use clap::ValueEnum;

/// PatchMode selects the labels carried by the patch document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PatchMode {
    /// Send the whole computed set.
    #[default]
    Full,
    /// Send only labels that are missing or differ on the pod.
    Delta,
    /// Send the whole computed set and delete every other pod label.
    Replace,
}

impl PatchMode {
    /// Builds the document for `target` given the pod's `current` labels.
    pub fn document(self, target: &LabelSet, current: &LabelSet) -> PatchDocument {
        match self {
            PatchMode::Full => build(target.clone()),
            PatchMode::Delta => build(target.difference(current)),
            PatchMode::Replace => build(target.clone()).removing_others(current),
        }
    }
}
