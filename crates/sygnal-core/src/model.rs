//! Panel state document model.
//!
//! The document is a two-level string map: a time-bucket identifier (the
//! interval, e.g. `"1h"`) maps to a record of named signal columns, each
//! holding the latest reported value. Keys are unique at both levels and
//! ordering carries no meaning; `BTreeMap` keeps the persisted file stable
//! across writes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column-to-value mapping nested under a single interval.
pub type IntervalRecord = BTreeMap<String, String>;

/// The full panel state: interval -> column -> latest value.
///
/// Serializes transparently as the plain two-level JSON object, which is
/// both the persisted file format and the `/stan` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateDocument(BTreeMap<String, IntervalRecord>);

impl StateDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no interval has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of intervals present.
    pub fn interval_count(&self) -> usize {
        self.0.len()
    }

    /// Sets `column = value` under `interval`, creating the interval record
    /// if absent. Existing sibling columns are preserved; a repeated
    /// (interval, column) pair keeps only the latest value.
    pub fn set(&mut self, interval: &str, column: &str, value: &str) {
        self.0
            .entry(interval.to_owned())
            .or_default()
            .insert(column.to_owned(), value.to_owned());
    }

    /// Looks up the value for an (interval, column) pair.
    pub fn get(&self, interval: &str, column: &str) -> Option<&str> {
        self.0.get(interval).and_then(|record| record.get(column)).map(String::as_str)
    }

    /// Returns the record for an interval, if present.
    pub fn interval(&self, interval: &str) -> Option<&IntervalRecord> {
        self.0.get(interval)
    }
}
