use chrono::Local;
use serde::Serialize;

use crate::error::Result;
use crate::models::DriftReport;

/// JSON shape consumed by the map visualization: one entry per moved
/// station with both positions, the distance, and a severity color.
#[derive(Debug, Serialize)]
struct MapEntry<'a> {
    id: &'a str,
    prev: Position,
    curr: Position,
    distance: f64,
    color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<String>,
}

#[derive(Debug, Serialize)]
struct Position {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Serialize)]
struct MapDocument<'a> {
    generated: String,
    current_label: &'a str,
    previous_label: &'a str,
    changes: Vec<MapEntry<'a>>,
    added: &'a [String],
    removed: &'a [String],
    skipped: Vec<SkippedEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct SkippedEntry<'a> {
    id: &'a str,
    reasons: Vec<String>,
}

/// Renders a drift report as JSON for downstream renderers.
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render(&self, report: &DriftReport) -> Result<String> {
        let document = MapDocument {
            generated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            current_label: &report.current_label,
            previous_label: &report.previous_label,
            changes: report
                .moved()
                .map(|change| MapEntry {
                    id: &change.key,
                    prev: Position {
                        lat: change.previous_lat,
                        lng: change.previous_lon,
                    },
                    curr: Position {
                        lat: change.current_lat,
                        lng: change.current_lon,
                    },
                    distance: change.distance_m,
                    color: change.class.color(),
                    expected: change.expected.as_ref().map(|fix| fix.key()),
                })
                .collect(),
            added: &report.added,
            removed: &report.removed,
            skipped: report
                .skipped
                .iter()
                .map(|s| SkippedEntry {
                    id: &s.key,
                    reasons: s.reasons.iter().map(|r| r.to_string()).collect(),
                })
                .collect(),
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(rendered)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
