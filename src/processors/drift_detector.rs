use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::SurveyConfig;
use crate::error::{DriftError, Result};
use crate::grid::SurveyGrid;
use crate::models::{
    ChangeClass, ChangeRecord, DriftReport, SkipReason, SkippedStation, Snapshot, StationRecord,
};
use crate::utils::coordinates::{haversine_distance_m, parse_coordinate};
use crate::utils::natural_sort::station_key;

/// Compares two snapshots of the coordinate table and classifies the drift.
pub struct DriftDetector {
    config: SurveyConfig,
    station_check: bool,
}

impl DriftDetector {
    pub fn new(config: SurveyConfig) -> Self {
        Self {
            config,
            station_check: false,
        }
    }

    /// Enable reverse geocoding of current coordinates so each change record
    /// carries the grid identity the point actually falls in.
    pub fn with_station_check(mut self, station_check: bool) -> Self {
        self.station_check = station_check;
        self
    }

    /// Compare the current snapshot against the previous one.
    ///
    /// Coordinate columns are resolved once from the current snapshot's
    /// header; per-key parse problems become skip entries and processing
    /// continues. Output ordering is the natural sort of the concatenated
    /// quadrat and station, so repeated runs produce identical reports.
    pub fn compare(
        &self,
        current: &Snapshot,
        previous: &Snapshot,
        current_label: &str,
        previous_label: &str,
    ) -> Result<DriftReport> {
        let (lat_col, lon_col) = self.resolve_coordinate_columns(current)?;
        info!(
            lat = %lat_col,
            lon = %lon_col,
            "comparing {} with {}",
            current_label,
            previous_label
        );

        let grid = if self.station_check {
            Some(SurveyGrid::new(&self.config)?)
        } else {
            None
        };

        let mut report = DriftReport {
            current_label: current_label.to_string(),
            previous_label: previous_label.to_string(),
            latitude_column: lat_col.clone(),
            longitude_column: lon_col.clone(),
            changes: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
            skipped: Vec::new(),
        };

        let mut all_keys: Vec<String> = current
            .keys()
            .chain(previous.keys())
            .map(|k| k.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        all_keys.sort_by_key(|k| station_key(k));

        for key in all_keys {
            match (current.get(&key), previous.get(&key)) {
                (Some(curr), Some(prev)) => {
                    self.compare_key(&key, curr, prev, &lat_col, &lon_col, &grid, &mut report)
                }
                (Some(_), None) => report.added.push(key),
                (None, Some(_)) => report.removed.push(key),
                // Keys come from the union of the two snapshots
                (None, None) => continue,
            }
        }

        debug!(
            changed = report.moved().count(),
            added = report.added.len(),
            removed = report.removed.len(),
            skipped = report.skipped.len(),
            "comparison complete"
        );
        Ok(report)
    }

    fn compare_key(
        &self,
        key: &str,
        curr: &StationRecord,
        prev: &StationRecord,
        lat_col: &str,
        lon_col: &str,
        grid: &Option<SurveyGrid>,
        report: &mut DriftReport,
    ) {
        let mut reasons = Vec::new();
        let prev_lat = read_coordinate(key, prev, lat_col, "prev", &mut reasons);
        let prev_lon = read_coordinate(key, prev, lon_col, "prev", &mut reasons);
        let curr_lat = read_coordinate(key, curr, lat_col, "curr", &mut reasons);
        let curr_lon = read_coordinate(key, curr, lon_col, "curr", &mut reasons);

        let (prev_lat, prev_lon, curr_lat, curr_lon) =
            match (prev_lat, prev_lon, curr_lat, curr_lon) {
                (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
                _ => {
                    report.skipped.push(SkippedStation {
                        key: key.to_string(),
                        reasons,
                    });
                    return;
                }
            };

        let distance_m = haversine_distance_m(prev_lat, prev_lon, curr_lat, curr_lon);
        let class = ChangeClass::classify(
            distance_m,
            self.config.significant_threshold_m,
            self.config.medium_threshold_m,
        );
        let expected = grid.as_ref().and_then(|g| g.locate(curr_lat, curr_lon));

        report.changes.push(ChangeRecord {
            key: key.to_string(),
            previous: prev.clone(),
            current: curr.clone(),
            previous_lat: prev_lat,
            previous_lon: prev_lon,
            current_lat: curr_lat,
            current_lon: curr_lon,
            distance_m,
            class,
            expected,
        });
    }

    /// Resolve the latitude/longitude column names against the current
    /// snapshot's header, case-insensitively. The same resolved names are
    /// then used on both sides of the comparison.
    fn resolve_coordinate_columns(&self, current: &Snapshot) -> Result<(String, String)> {
        let find = |aliases: &[String]| {
            current
                .headers()
                .iter()
                .find(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
                .cloned()
        };

        let lat = find(&self.config.latitude_aliases);
        let lon = find(&self.config.longitude_aliases);

        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(DriftError::MissingColumn {
                header: current.headers().join(", "),
            }),
        }
    }
}

/// Read one coordinate cell; parse failures are downgraded to skip reasons
/// so the rest of the run continues.
fn read_coordinate(
    key: &str,
    record: &StationRecord,
    column: &str,
    side: &str,
    reasons: &mut Vec<SkipReason>,
) -> Option<f64> {
    match record.get(column) {
        None | Some("") => {
            reasons.push(SkipReason::MissingValue {
                side: side.to_string(),
                column: column.to_string(),
            });
            None
        }
        Some(value) => match parse_coordinate(value, key, column) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                reasons.push(SkipReason::InvalidNumber {
                    side: side.to_string(),
                    column: column.to_string(),
                    value: value.to_string(),
                });
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::SnapshotReader;
    use pretty_assertions::assert_eq;

    fn load(content: &str) -> Snapshot {
        SnapshotReader::new().read_content(content).unwrap()
    }

    fn detector() -> DriftDetector {
        DriftDetector::new(SurveyConfig::default())
    }

    #[test]
    fn test_significant_move_detected() {
        let previous = load("Quadrat,Station,lat,long\nA,1,49.26,-123.15\n");
        let current = load("Quadrat,Station,lat,long\nA,1,49.2605,-123.1505\n");

        let report = detector()
            .compare(&current, &previous, "curr", "prev")
            .unwrap();

        assert_eq!(report.changes.len(), 1);
        let change = &report.changes[0];
        assert_eq!(change.key, "A/1");
        assert!((change.distance_m - 66.39).abs() < 0.1);
        assert_eq!(change.class, ChangeClass::Significant);
    }

    #[test]
    fn test_added_and_removed_stations() {
        let previous = load("Quadrat,Station,lat,long\nA,1,49.26,-123.15\nA,2,49.26,-123.14\n");
        let current = load("Quadrat,Station,lat,long\nA,1,49.26,-123.15\nB,1,49.26,-123.12\n");

        let report = detector()
            .compare(&current, &previous, "curr", "prev")
            .unwrap();

        assert_eq!(report.added, vec!["B/1"]);
        assert_eq!(report.removed, vec!["A/2"]);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].class, ChangeClass::Unchanged);
    }

    #[test]
    fn test_invalid_coordinate_is_skipped_not_fatal() {
        let previous =
            load("Quadrat,Station,lat,long\nC,3,not-a-number,-123.15\nA,1,49.26,-123.15\n");
        let current = load("Quadrat,Station,lat,long\nC,3,49.24,-123.15\nA,1,49.26,-123.15\n");

        let report = detector()
            .compare(&current, &previous, "curr", "prev")
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].key, "C/3");
        assert!(matches!(
            report.skipped[0].reasons[0],
            SkipReason::InvalidNumber { .. }
        ));
        // The valid key is still compared
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].key, "A/1");
    }

    #[test]
    fn test_missing_coordinate_names_side_and_column() {
        let previous = load("Quadrat,Station,lat,long\nA,1,49.26,\n");
        let current = load("Quadrat,Station,lat,long\nA,1,49.26,-123.15\n");

        let report = detector()
            .compare(&current, &previous, "curr", "prev")
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        let reason = format!("{}", report.skipped[0].reasons[0]);
        assert_eq!(reason, "missing prev long");
    }

    #[test]
    fn test_missing_columns_fatal() {
        let previous = load("Quadrat,Station,lat,long\nA,1,49.26,-123.15\n");
        let current = load("Quadrat,Station,x,y\nA,1,49.26,-123.15\n");

        let result = detector().compare(&current, &previous, "curr", "prev");
        assert!(matches!(result, Err(DriftError::MissingColumn { .. })));
    }

    #[test]
    fn test_column_aliases_resolved_case_insensitively() {
        let previous = load("Quadrat,Station,Latitude,LONGITUDE\nA,1,49.26,-123.15\n");
        let current = load("Quadrat,Station,Latitude,LONGITUDE\nA,1,49.26,-123.15\n");

        let report = detector()
            .compare(&current, &previous, "curr", "prev")
            .unwrap();
        assert_eq!(report.latitude_column, "Latitude");
        assert_eq!(report.longitude_column, "LONGITUDE");
        assert_eq!(report.changes.len(), 1);
    }

    #[test]
    fn test_output_is_naturally_ordered() {
        let table = "Quadrat,Station,lat,long\nA,10,49.26,-123.15\nA,9,49.26,-123.14\nA,2,49.26,-123.13\nB,1,49.26,-123.12\n";
        let previous = load(table);
        let current = load(table);

        let report = detector()
            .compare(&current, &previous, "curr", "prev")
            .unwrap();
        let keys: Vec<&str> = report.changes.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["A/2", "A/9", "A/10", "B/1"]);
    }

    #[test]
    fn test_station_check_flags_identity_mismatch() {
        let grid = SurveyGrid::new(&SurveyConfig::default()).unwrap();
        // Take the true center of B/5 but record it under A/1
        let b5 = grid
            .station_coordinates('B')
            .unwrap()
            .into_iter()
            .find(|s| s.station == 5)
            .unwrap();
        let table = |lat: f64, lon: f64| {
            format!("Quadrat,Station,lat,long\nA,1,{},{}\n", lat, lon)
        };

        let previous = load(&table(b5.latitude, b5.longitude));
        let current = load(&table(b5.latitude, b5.longitude));

        let report = DriftDetector::new(SurveyConfig::default())
            .with_station_check(true)
            .compare(&current, &previous, "curr", "prev")
            .unwrap();

        let change = &report.changes[0];
        let expected = change.expected.as_ref().unwrap();
        assert_eq!(expected.quadrat, 'B');
        assert_eq!(expected.station, 5);
        assert!(change.is_identity_mismatch());
    }

    #[test]
    fn test_idempotent_output() {
        let previous = load("Quadrat,Station,lat,long\nA,1,49.26,-123.15\nC,3,bad,-123.1\n");
        let current = load("Quadrat,Station,lat,long\nA,1,49.2605,-123.1505\nB,1,49.25,-123.1\nC,3,49.24,-123.1\n");

        let detector = detector();
        let first = detector
            .compare(&current, &previous, "curr", "prev")
            .unwrap();
        let second = detector
            .compare(&current, &previous, "curr", "prev")
            .unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
