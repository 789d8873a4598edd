use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::Result;
use crate::models::{Snapshot, StationRecord};

/// Loads a coordinate reference table into a keyed `Snapshot`.
pub struct SnapshotReader;

impl SnapshotReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse CSV content (header row + data rows) into a snapshot.
    ///
    /// Headers and values are whitespace-trimmed before use. Rows missing the
    /// Quadrat or Station field get an empty key component rather than
    /// failing; duplicate keys overwrite, last row wins.
    pub fn read_content(&self, content: &str) -> Result<Snapshot> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut snapshot = Snapshot::new(headers.clone());
        for row in reader.records() {
            let row = row?;
            let fields: BTreeMap<String, String> = headers
                .iter()
                .zip(row.iter())
                .map(|(name, value)| (name.clone(), value.trim().to_string()))
                .collect();
            snapshot.insert(StationRecord::new(fields));
        }

        debug!(stations = snapshot.len(), "loaded snapshot");
        Ok(snapshot)
    }

    /// Read a snapshot from a file on disk.
    pub fn read_file(&self, path: &Path) -> Result<Snapshot> {
        let content = fs::read_to_string(path)?;
        self.read_content(&content)
    }
}

impl Default for SnapshotReader {
    fn default() -> Self {
        Self::new()
    }
}
