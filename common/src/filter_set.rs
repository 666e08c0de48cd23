//! Active attribute filters and their single-string URL encoding.
//!
//! A [`FilterSet`] is encoded as `"<key>_<value>_<value>"` segments joined by
//! `.`, e.g. `{color: [red, blue], size: [m]}` becomes `color_red_blue.size_m`.
//! Keys and values containing `.` or `_` cannot round trip through that
//! string: the separators are not escaped, so such a key or value is split
//! into several tokens on decode.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const SEGMENT_SEPARATOR: char = '.';
pub const TOKEN_SEPARATOR: char = '_';

/// Attribute key -> selected value ids. Keys and values keep insertion order;
/// a key is only present while it has at least one value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "FilterEntries", into = "FilterEntries")]
pub struct FilterSet {
    entries: Vec<(String, Vec<String>)>,
}

/// Serialized form of a [`FilterSet`]; deserializing goes through
/// [`FilterSet::set_values`] so keys without values are dropped.
#[derive(Serialize, Deserialize)]
struct FilterEntries {
    entries: Vec<(String, Vec<String>)>,
}

impl From<FilterEntries> for FilterSet {
    fn from(raw: FilterEntries) -> Self {
        raw.entries.into_iter().collect()
    }
}

impl From<FilterSet> for FilterEntries {
    fn from(filters: FilterSet) -> Self {
        Self { entries: filters.entries }
    }
}

/// A filter segment that decoded to an attribute key without any values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedFilterToken {
    pub segment: String,
}

impl Display for MalformedFilterToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Malformed filter segment: {:?}", self.segment)
    }
}

impl std::error::Error for MalformedFilterToken {}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of attributes with at least one selected value.
    pub fn active_filter_count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn is_selected(&self, key: &str, value: &str) -> bool {
        self.get(key).is_some_and(|values| values.iter().any(|v| v == value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Replace the values of `key`, keeping its position if it already
    /// exists. An empty list removes the key.
    pub fn set_values(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        if values.is_empty() {
            self.entries.retain(|(k, _)| k != &key);
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| k == &key) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Deselect `value` if it is selected for `key`, otherwise append it.
    /// Removing the last value of a key drops the key.
    pub fn toggle(&mut self, key: &str, value: &str) {
        let Some(position) = self.entries.iter().position(|(k, _)| k == key) else {
            self.entries.push((key.to_string(), vec![value.to_string()]));
            return;
        };
        let values = &mut self.entries[position].1;
        if let Some(value_position) = values.iter().position(|v| v == value) {
            values.remove(value_position);
            if values.is_empty() {
                self.entries.remove(position);
            }
        } else {
            values.push(value.to_string());
        }
    }

    /// Returns a copy with `(key, value)` toggled.
    pub fn toggled(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.toggle(key, value);
        next
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|(key, values)| {
                let mut segment = key.clone();
                for value in values {
                    segment.push(TOKEN_SEPARATOR);
                    segment.push_str(value);
                }
                segment
            })
            .collect::<Vec<_>>()
            .join(&SEGMENT_SEPARATOR.to_string())
    }

    /// Decode a filter string, silently dropping malformed segments.
    pub fn decode(encoded: &str) -> Self {
        Self::decode_with_rejects(encoded).0
    }

    /// Decode a filter string, returning the segments that were dropped.
    ///
    /// A segment repeating an earlier key replaces that key's values.
    pub fn decode_with_rejects(encoded: &str) -> (Self, Vec<MalformedFilterToken>) {
        let mut filters = Self::new();
        let mut rejects = Vec::new();
        for segment in encoded.split(SEGMENT_SEPARATOR).filter(|s| !s.is_empty()) {
            let mut tokens = segment.split(TOKEN_SEPARATOR).filter(|t| !t.is_empty());
            let Some(key) = tokens.next() else {
                rejects.push(MalformedFilterToken { segment: segment.to_string() });
                continue;
            };
            let values = tokens.map(|t| t.to_string()).collect::<Vec<_>>();
            if values.is_empty() {
                rejects.push(MalformedFilterToken { segment: segment.to_string() });
                continue;
            }
            filters.set_values(key, values);
        }
        (filters, rejects)
    }
}

impl Display for FilterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Vec<V>)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (key, values) in iter {
            filters.set_values(key, values.into_iter().map(Into::into).collect());
        }
        filters
    }
}
