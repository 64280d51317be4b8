//! Allow-list and deny-list filtering of label sets.

use super::set::LabelSet;
use std::collections::BTreeSet;

/// FilterPolicy decides which label keys are copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Keep every key not in the deny-list.
    Exclude(BTreeSet<String>),
    /// Keep only keys in the allow-list.
    Include(BTreeSet<String>),
}

impl FilterPolicy {
    /// Builds a policy from the two option lists.
    ///
    /// A non-empty allow-list selects [`FilterPolicy::Include`] and the
    /// deny-list is then ignored. Otherwise [`FilterPolicy::Exclude`] is
    /// used, even when the deny-list is empty too.
    pub fn from_lists<E, I>(exclude: E, include: I) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let include: BTreeSet<String> = include.into_iter().map(Into::into).collect();
        if include.is_empty() {
            FilterPolicy::Exclude(exclude.into_iter().map(Into::into).collect())
        } else {
            FilterPolicy::Include(include)
        }
    }

    /// Returns true if a label with this key survives the filter.
    pub fn admits(&self, key: &str) -> bool {
        match self {
            FilterPolicy::Exclude(deny) => !deny.contains(key),
            FilterPolicy::Include(allow) => allow.contains(key),
        }
    }

    /// Returns the name of the active mode, for logging.
    pub fn mode(&self) -> &'static str {
        match self {
            FilterPolicy::Exclude(_) => "exclude",
            FilterPolicy::Include(_) => "include",
        }
    }

    /// Computes the labels of `source` that survive the filter.
    ///
    /// Values are passed through verbatim and keys never outside `source`.
    pub fn select(&self, source: &LabelSet) -> LabelSet {
        source.iter().filter(|(k, _)| self.admits(k)).collect()
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy::Exclude(BTreeSet::new())
    }
}

/// Computes the target label set for `source` under `policy`.
pub fn select(source: &LabelSet, policy: &FilterPolicy) -> LabelSet {
    policy.select(source)
}
