use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::StationFix;
use crate::models::StationRecord;

/// Severity of one station's coordinate displacement.
///
/// Three-tier scheme with strict `>` at every lower bound: exactly 50 m is
/// medium, exactly 20 m is minor, exactly 0 m is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeClass {
    Unchanged,
    Minor,
    Medium,
    Significant,
}

impl ChangeClass {
    pub fn classify(distance_m: f64, significant_threshold_m: f64, medium_threshold_m: f64) -> Self {
        if distance_m > significant_threshold_m {
            ChangeClass::Significant
        } else if distance_m > medium_threshold_m {
            ChangeClass::Medium
        } else if distance_m > 0.0 {
            ChangeClass::Minor
        } else {
            ChangeClass::Unchanged
        }
    }

    /// Marker color used by the map renderer.
    pub fn color(&self) -> &'static str {
        match self {
            ChangeClass::Significant => "red",
            ChangeClass::Medium => "yellow",
            ChangeClass::Minor | ChangeClass::Unchanged => "green",
        }
    }
}

impl fmt::Display for ChangeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeClass::Unchanged => "Unchanged",
            ChangeClass::Minor => "Minor change",
            ChangeClass::Medium => "Medium change",
            ChangeClass::Significant => "SIGNIFICANT CHANGE",
        };
        write!(f, "{}", label)
    }
}

/// Result of comparing one station key across two snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub key: String,
    pub previous: StationRecord,
    pub current: StationRecord,
    pub previous_lat: f64,
    pub previous_lon: f64,
    pub current_lat: f64,
    pub current_lon: f64,
    pub distance_m: f64,
    pub class: ChangeClass,
    /// Grid identity inferred from the current coordinate, when the station
    /// check is enabled and the point falls inside the survey grid.
    pub expected: Option<StationFix>,
}

impl ChangeRecord {
    /// True when the reverse-geocoded identity disagrees with the nominal
    /// quadrat/station of the key.
    pub fn is_identity_mismatch(&self) -> bool {
        match &self.expected {
            Some(fix) => fix.key() != self.key,
            None => false,
        }
    }
}

/// Why a key present in both snapshots could not be compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    MissingValue { side: String, column: String },
    InvalidNumber { side: String, column: String, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingValue { side, column } => {
                write!(f, "missing {} {}", side, column)
            }
            SkipReason::InvalidNumber {
                side,
                column,
                value,
            } => write!(f, "invalid {} {}: '{}'", side, column, value),
        }
    }
}

/// One uncomparable key with the full list of problems found on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedStation {
    pub key: String,
    pub reasons: Vec<SkipReason>,
}

/// Complete output of one comparison run. Every key in either snapshot lands
/// in exactly one of `changes`, `added`, `removed`, or `skipped`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    pub current_label: String,
    pub previous_label: String,
    pub latitude_column: String,
    pub longitude_column: String,
    /// Matched keys with parseable coordinates on both sides, in natural
    /// quadrat/station order. Includes unchanged stations.
    pub changes: Vec<ChangeRecord>,
    /// Keys present only in the current snapshot.
    pub added: Vec<String>,
    /// Keys present only in the previous snapshot.
    pub removed: Vec<String>,
    /// Matched keys with missing or unparseable coordinate data.
    pub skipped: Vec<SkippedStation>,
}

impl DriftReport {
    pub fn moved(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.changes
            .iter()
            .filter(|c| c.class != ChangeClass::Unchanged)
    }

    pub fn significant(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.changes
            .iter()
            .filter(|c| c.class == ChangeClass::Significant)
    }
}
