//! Cross-document identity index.
//!
//! One entry per tracked document URI, holding the raw `_id` value, the
//! record type and (for pipes) the resolved sink dataset name. Entries are
//! created or overwritten whenever a document parses successfully — during
//! the initial workspace scan and on every live edit — and are never
//! removed: there is no delete/rename tracking, so a stale entry can keep
//! reporting conflicts until its URI is re-validated. That gap is a known
//! product decision, not an accident.
//!
//! The index is the only mutable shared state in the system. All mutation
//! goes through `&mut self`, so a caller wanting concurrency wraps one index
//! in one lock and writes are serialized by construction.

use std::collections::BTreeMap;

use url::Url;
use serde_json::{Map, Value};

use crate::record::{record_type, RecordType};

/// What the index knows about one document.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Raw `_id` value, whatever its JSON type; `None` when the key is
    /// absent. The non-string case is a validation concern, not an index
    /// concern — conflict queries compare exact values.
    pub declared_id: Option<Value>,
    pub record_type: RecordType,
    /// Dataset a pipe writes to; only meaningful for pipe records.
    pub sink_dataset: Option<String>,
}

/// Identity index over every document seen so far, keyed by URI.
///
/// Backed by an ordered map so conflict lists and dataset listings come out
/// in a deterministic order.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    entries: BTreeMap<Url, IndexEntry>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest parsed value for a document, overwriting any prior
    /// entry for its URI. Non-object documents are ignored.
    pub fn record_document(&mut self, uri: &Url, value: &Value) {
        let Some(object) = value.as_object() else {
            return;
        };
        let record_type = record_type(uri);
        let sink_dataset = match record_type {
            RecordType::Pipe => sink_dataset(object),
            _ => None,
        };
        self.entries.insert(
            uri.clone(),
            IndexEntry {
                declared_id: object.get("_id").cloned(),
                record_type,
                sink_dataset,
            },
        );
    }

    /// Every indexed URI other than `exclude` whose declared `_id` equals
    /// `id` — exact equality, type and value. Ordered by URI.
    pub fn find_id_conflicts(&self, id: &Value, exclude: &Url) -> Vec<Url> {
        self.entries
            .iter()
            .filter(|(uri, entry)| *uri != exclude && entry.declared_id.as_ref() == Some(id))
            .map(|(uri, _)| uri.clone())
            .collect()
    }

    pub fn entry(&self, uri: &Url) -> Option<&IndexEntry> {
        self.entries.get(uri)
    }

    /// Distinct sink dataset names across all indexed pipes, sorted.
    pub fn datasets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .values()
            .filter_map(|entry| entry.sink_dataset.as_deref())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve the dataset a pipe writes to. The sink type defaults to
/// `"dataset"` when absent; any other type means the pipe does not produce a
/// dataset. The dataset name defaults to the pipe's own `_id` when `sink`
/// carries no usable name. Only string names are recorded.
fn sink_dataset(object: &Map<String, Value>) -> Option<String> {
    let sink = object.get("sink");
    let type_is_dataset = match sink.and_then(|sink| sink.get("type")) {
        None => true,
        Some(Value::String(sink_type)) => sink_type == "dataset",
        Some(_) => false,
    };
    if !type_is_dataset {
        return None;
    }
    let name = match sink.and_then(|sink| sink.get("dataset")) {
        Some(Value::Null) | None => object.get("_id").and_then(Value::as_str),
        Some(value) => value.as_str(),
    };
    name.map(str::to_owned)
}
