//! Ordered multi-value aggregation of extracted tags.

use std::collections::HashMap;

/// Key prefix that marks an OpenGraph tag.
pub const OG_PREFIX: &str = "og:";

/// One `(key, value)` pair emitted by the extractor for a matching `<meta>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub key: String,
    pub value: String,
}

/// Mapping from tag key to its values.
///
/// Storage keeps keys in first-seen order and values in document order.
/// Lexical key order is only produced by [`TagMap::sorted`], at format time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the sequence for `key`, creating the entry on first sight.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    pub fn push_pair(&mut self, pair: TagPair) {
        self.push(pair.key, pair.value);
    }

    /// Values for `key` in document order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of values across all keys.
    pub fn value_count(&self) -> usize {
        self.entries.iter().map(|(_, values)| values.len()).sum()
    }

    /// Entries in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Entries with keys in ascending lexical order; values keep document order.
    pub fn sorted(&self) -> Vec<(&str, &[String])> {
        let mut out: Vec<(&str, &[String])> = self.iter().collect();
        out.sort_unstable_by(|a, b| a.0.cmp(b.0));
        out
    }
}

impl FromIterator<TagPair> for TagMap {
    fn from_iter<I: IntoIterator<Item = TagPair>>(iter: I) -> Self {
        let mut map = TagMap::new();
        for pair in iter {
            map.push_pair(pair);
        }
        map
    }
}
