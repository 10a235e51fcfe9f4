use std::time::Duration;

use crate::reconcile::StatusRecord;

/// Aggregate figures over the records shown in a report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub records: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub not_processed: usize,
    pub total_entries: usize,
    /// Wall-clock duration of the engine call
    pub wall_clock: Duration,
}

impl ReportSummary {
    pub fn from_records(records: &[StatusRecord], wall_clock: Duration) -> Self {
        let mut summary = Self {
            records: records.len(),
            wall_clock,
            ..Default::default()
        };

        for record in records {
            if record.outcome.is_success() {
                summary.succeeded += 1;
                summary.total_entries += record.outcome.entries();
            } else if record.outcome.is_failed() {
                summary.failed += 1;
            } else {
                summary.not_processed += 1;
            }
        }

        summary
    }

    /// Mean entries per successful file, `None` when nothing succeeded
    pub fn average_entries(&self) -> Option<f64> {
        if self.succeeded == 0 {
            return None;
        }
        Some(self.total_entries as f64 / self.succeeded as f64)
    }

    /// One-line summary for progress output
    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Files analyzed: {} total, {} succeeded, {} failed",
            self.records, self.succeeded, self.failed
        );

        if self.not_processed > 0 {
            output.push_str(&format!(", {} not processed", self.not_processed));
        }

        output.push_str(&format!(
            "; {} entries in {}ms",
            self.total_entries,
            self.wall_clock.as_millis()
        ));

        output
    }
}
