//! Attribution record - the value published to consumers

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Canonical UTM parameter names captured when no explicit list is configured
pub const DEFAULT_CAPTURE_PARAMS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// Mapping from parameter name to captured value
///
/// Keys are unique; iteration is in key order so output is deterministic.
/// Values are opaque strings and are never validated beyond non-emptiness
/// at capture time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributionRecord(BTreeMap<String, String>);

impl AttributionRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up a captured value by parameter name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Check whether a parameter was captured
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of captured parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was captured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Consume the record into its underlying map
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for AttributionRecord {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributionRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for AttributionRecord {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
