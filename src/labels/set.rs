//! Label set type shared by nodes, pods and computed patch targets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// LabelSet is a mapping of unique label keys to values.
///
/// A set is never edited after it is read from its source; filtering
/// always produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    entries: BTreeMap<String, String>,
}

impl LabelSet {
    /// Creates a new empty set.
    pub fn new() -> Self {
        LabelSet {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the number of labels in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if the set contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns an iterator over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns true if every key of this set is also a key of `other`.
    pub fn keys_subset_of(&self, other: &LabelSet) -> bool {
        self.keys().all(|k| other.contains_key(k))
    }

    /// Returns the labels of this set whose value is absent or different in `other`.
    pub fn difference(&self, other: &LabelSet) -> LabelSet {
        self.iter()
            .filter(|(k, v)| other.get(k) != Some(*v))
            .collect()
    }

    /// Consumes the set and returns the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl From<BTreeMap<String, String>> for LabelSet {
    fn from(entries: BTreeMap<String, String>) -> Self {
        LabelSet { entries }
    }
}

impl From<LabelSet> for BTreeMap<String, String> {
    fn from(set: LabelSet) -> Self {
        set.entries
    }
}

impl From<Option<BTreeMap<String, String>>> for LabelSet {
    fn from(entries: Option<BTreeMap<String, String>>) -> Self {
        entries.map(LabelSet::from).unwrap_or_default()
    }
}

impl<K, V> FromIterator<(K, V)> for LabelSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        LabelSet {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter_dedups_keys() {
        let set: LabelSet = vec![("zone", "a"), ("zone", "b"), ("tier", "gold")]
            .into_iter()
            .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("zone"), Some("b"));
        assert_eq!(set.get("tier"), Some("gold"));
    }

    #[test]
    fn test_missing_labels_become_empty_set() {
        let set = LabelSet::from(None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_keys_subset_of() {
        let source: LabelSet = [("a", "1"), ("b", "2")].into_iter().collect();
        let narrow: LabelSet = [("a", "1")].into_iter().collect();
        let other: LabelSet = [("c", "3")].into_iter().collect();

        assert!(narrow.keys_subset_of(&source));
        assert!(LabelSet::new().keys_subset_of(&source));
        assert!(!other.keys_subset_of(&source));
    }

    #[test]
    fn test_difference_keeps_changed_and_new() {
        let wanted: LabelSet = [("zone", "us-east"), ("tier", "gold"), ("rack", "r1")]
            .into_iter()
            .collect();
        let current: LabelSet = [("zone", "us-east"), ("tier", "silver"), ("app", "web")]
            .into_iter()
            .collect();

        let diff = wanted.difference(&current);
        let expected: LabelSet = [("tier", "gold"), ("rack", "r1")].into_iter().collect();
        assert_eq!(diff, expected);
    }

    #[test]
    fn test_display_is_sorted() {
        let set: LabelSet = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(format!("{}", set), "{a=1, b=2}");
        assert_eq!(format!("{}", LabelSet::new()), "{}");
    }
}
