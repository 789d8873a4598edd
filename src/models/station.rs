use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::utils::constants::{QUADRAT_COLUMN, STATION_COLUMN};

/// One row of the coordinate reference table: column name to trimmed value.
///
/// Only `Quadrat` and `Station` are interpreted here; every other column is
/// opaque metadata carried through untouched. A BTreeMap keeps column
/// iteration and serialization order deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    fields: BTreeMap<String, String>,
}

impl StationRecord {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|v| v.as_str())
    }

    pub fn quadrat(&self) -> &str {
        self.get(QUADRAT_COLUMN).unwrap_or("")
    }

    pub fn station(&self) -> &str {
        self.get(STATION_COLUMN).unwrap_or("")
    }

    /// Composite key in the form "Quadrat/Station", with empty components
    /// for missing fields.
    pub fn key(&self) -> String {
        format!("{}/{}", self.quadrat(), self.station())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }
}

/// One point-in-time view of the reference table, keyed by "Quadrat/Station".
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: HashMap<String, StationRecord>,
    headers: Vec<String>,
}

impl Snapshot {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            records: HashMap::new(),
            headers,
        }
    }

    /// Insert a record under its composite key. Duplicate keys overwrite:
    /// last row wins.
    pub fn insert(&mut self, record: StationRecord) {
        self.records.insert(record.key(), record);
    }

    pub fn get(&self, key: &str) -> Option<&StationRecord> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Trimmed header names, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}
