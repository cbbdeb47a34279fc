//! Header shape translation.
//!
//! The edge speaks a multi-value shape (`name → [{key?, value}, ...]`) while
//! upstream HTTP code speaks a standard map where a name holds one string or
//! a list of strings. Names are stored lowercase on both sides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One value of an edge header, optionally tagged with the header name as received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeaderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl HeaderEntry {
    /// Entry carrying only a value.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    /// Entry carrying the received header name alongside the value.
    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// Edge header map: lowercase name → ordered entries.
pub type EdgeHeaders = BTreeMap<String, Vec<HeaderEntry>>;

/// A standard header value: either a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HeaderValues {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValues {
    /// First value, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            HeaderValues::Single(v) => Some(v.as_str()),
            HeaderValues::Multiple(vs) => vs.first().map(String::as_str),
        }
    }
}

/// Standard header map: lowercase name → one or more values.
pub type StandardHeaders = BTreeMap<String, HeaderValues>;

/// Convert a standard header map into the edge's multi-value shape.
pub fn to_multi_value(headers: &StandardHeaders) -> EdgeHeaders {
    let mut edge = EdgeHeaders::new();
    merge_multi_value(&mut edge, headers);
    edge
}

/// Append `headers` onto an existing edge map.
///
/// Values for a name that is already present are appended after the existing
/// entries, never overwriting them. Empty lists add nothing, so a name is only
/// ever present with at least one entry.
pub fn merge_multi_value(edge: &mut EdgeHeaders, headers: &StandardHeaders) {
    for (name, values) in headers {
        let entries: Vec<HeaderEntry> = match values {
            HeaderValues::Single(v) => vec![HeaderEntry::value(v.clone())],
            HeaderValues::Multiple(vs) => vs.iter().cloned().map(HeaderEntry::value).collect(),
        };
        if entries.is_empty() {
            continue;
        }
        edge.entry(name.to_ascii_lowercase())
            .or_default()
            .extend(entries);
    }
}

/// Collapse edge headers to a single value per name (first entry wins).
pub fn to_single_value(edge: &EdgeHeaders) -> StandardHeaders {
    edge.iter()
        .filter_map(|(name, entries)| {
            entries
                .first()
                .map(|entry| (name.clone(), HeaderValues::Single(entry.value.clone())))
        })
        .collect()
}
