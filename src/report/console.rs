use std::fmt::Write;

use colored::Colorize;

use crate::models::{ChangeClass, DriftReport};

/// Renders a drift report as aligned console text, one line per station.
pub struct ConsoleReporter {
    use_color: bool,
    show_unchanged: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            use_color: true,
            show_unchanged: false,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_unchanged(mut self, show_unchanged: bool) -> Self {
        self.show_unchanged = show_unchanged;
        self
    }

    pub fn render(&self, report: &DriftReport) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Comparing {} with {} (columns: {}, {})\n",
            report.current_label,
            report.previous_label,
            report.latitude_column,
            report.longitude_column
        );
        let _ = writeln!(
            out,
            "{:<20} {:<15} {}",
            "Quadrat/Station", "Distance (m)", "Status"
        );
        let _ = writeln!(out, "{}", "-".repeat(50));

        for change in &report.changes {
            if change.class == ChangeClass::Unchanged && !self.show_unchanged {
                continue;
            }
            let status = self.paint_class(change.class);
            let mut line = format!("{:<20} {:<15.2} {}", change.key, change.distance_m, status);
            if change.is_identity_mismatch() {
                // expected is always present when is_identity_mismatch is true
                if let Some(fix) = &change.expected {
                    line.push_str(&format!(" (coordinate falls in {})", fix.key()));
                }
            }
            let _ = writeln!(out, "{}", line);
        }

        for entry in &report.skipped {
            let reasons: Vec<String> = entry.reasons.iter().map(|r| r.to_string()).collect();
            let _ = writeln!(
                out,
                "{:<20} {:<15} Missing coordinate data: {}",
                entry.key,
                "N/A",
                reasons.join(", ")
            );
        }
        for key in &report.removed {
            let _ = writeln!(out, "{:<20} {:<15} Station removed", key, "REMOVED");
        }
        for key in &report.added {
            let _ = writeln!(out, "{:<20} {:<15} New station added", key, "NEW");
        }

        let _ = writeln!(out, "\n{}", "-".repeat(50));
        let _ = writeln!(
            out,
            "Total stations with coordinate changes: {}",
            report.moved().count()
        );

        let significant: Vec<_> = report.significant().collect();
        if significant.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                self.paint_green("No significant location changes found (>50m)")
            );
        } else {
            let _ = writeln!(
                out,
                "\n{}",
                self.paint_red(&format!(
                    "Found {} stations with significant changes (>50m):",
                    significant.len()
                ))
            );
            for change in significant {
                let _ = writeln!(out, "  - {}: {:.2}m", change.key, change.distance_m);
            }
        }

        out
    }

    fn paint_class(&self, class: ChangeClass) -> String {
        let label = class.to_string();
        if self.use_color && class == ChangeClass::Significant {
            label.red().to_string()
        } else {
            label
        }
    }

    fn paint_red(&self, text: &str) -> String {
        if self.use_color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_green(&self, text: &str) -> String {
        if self.use_color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurveyConfig;
    use crate::processors::DriftDetector;
    use crate::readers::SnapshotReader;

    fn sample_report() -> DriftReport {
        let reader = SnapshotReader::new();
        let previous = reader
            .read_content("Quadrat,Station,lat,long\nA,1,49.26,-123.15\nA,2,49.26,-123.14\n")
            .unwrap();
        let current = reader
            .read_content("Quadrat,Station,lat,long\nA,1,49.2605,-123.1505\nB,1,49.25,-123.1\n")
            .unwrap();
        DriftDetector::new(SurveyConfig::default())
            .compare(&current, &previous, "filesystem", "ab12cd34")
            .unwrap()
    }

    #[test]
    fn test_render_mentions_all_sections() {
        let text = ConsoleReporter::new().with_color(false).render(&sample_report());

        assert!(text.contains("Comparing filesystem with ab12cd34"));
        assert!(text.contains("A/1"));
        assert!(text.contains("SIGNIFICANT CHANGE"));
        assert!(text.contains("A/2"));
        assert!(text.contains("Station removed"));
        assert!(text.contains("B/1"));
        assert!(text.contains("New station added"));
        assert!(text.contains("significant changes (>50m)"));
    }

    #[test]
    fn test_render_is_stable() {
        let report = sample_report();
        let reporter = ConsoleReporter::new().with_color(false);
        assert_eq!(reporter.render(&report), reporter.render(&report));
    }

    #[test]
    fn test_unchanged_hidden_by_default() {
        let reader = SnapshotReader::new();
        let table = "Quadrat,Station,lat,long\nA,1,49.26,-123.15\n";
        let previous = reader.read_content(table).unwrap();
        let current = reader.read_content(table).unwrap();
        let report = DriftDetector::new(SurveyConfig::default())
            .compare(&current, &previous, "curr", "prev")
            .unwrap();

        let hidden = ConsoleReporter::new().with_color(false).render(&report);
        assert!(!hidden.contains("Unchanged"));

        let shown = ConsoleReporter::new()
            .with_color(false)
            .with_unchanged(true)
            .render(&report);
        assert!(shown.contains("Unchanged"));
    }
}
