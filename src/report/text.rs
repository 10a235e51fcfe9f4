use std::fmt::Write;
use std::time::Duration;

use crate::colors::ColorScheme;
use crate::reconcile::StatusRecord;
use crate::stats::ReportSummary;

const HEAVY_RULE: &str = "================================================================";
const LIGHT_RULE: &str = "----------------------------------------------------------------";

/// Millisecond-precision human duration, e.g. `1s 250ms`
pub fn format_duration(duration: Duration) -> String {
    let truncated = Duration::from_millis(duration.as_millis() as u64);
    humantime::format_duration(truncated).to_string()
}

fn write_record(out: &mut String, record: &StatusRecord, colors: &ColorScheme, indent: &str) {
    let status = colors.paint_status(&record.outcome, record.outcome.label());

    let _ = writeln!(out, "ID: {}", record.id);
    let _ = writeln!(out, "{indent}Path: {}", record.path);
    let _ = writeln!(out, "{indent}Type: {}", record.log_type);
    let _ = writeln!(out, "{indent}Status: {status}");

    if record.outcome.is_success() {
        let _ = writeln!(out, "{indent}Entries: {}", record.outcome.entries());
        let _ = writeln!(
            out,
            "{indent}Duration: {}",
            format_duration(record.outcome.duration())
        );
    }

    if let Some(message) = record.outcome.error_message() {
        let _ = writeln!(out, "{indent}Error: {message}");
    }

    out.push('\n');
}

fn write_summary(out: &mut String, summary: &ReportSummary, colors: &ColorScheme) {
    let _ = writeln!(out, "{LIGHT_RULE}");
    let _ = writeln!(out, "{}SUMMARY{}", colors.heading, colors.reset);
    let _ = writeln!(
        out,
        "   Files analyzed successfully: {}/{}",
        summary.succeeded, summary.records
    );
    let _ = writeln!(out, "   Total entries: {}", summary.total_entries);
    let _ = writeln!(
        out,
        "   Total analysis time: {}",
        format_duration(summary.wall_clock)
    );
    if let Some(average) = summary.average_entries() {
        let _ = writeln!(out, "   Average entries per file: {average:.1}");
    }
}

/// Report printed to the terminal: one block per record, then the aggregate
pub fn render_text(records: &[StatusRecord], summary: &ReportSummary, colors: &ColorScheme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}ANALYSIS RESULTS{}", colors.heading, colors.reset);
    let _ = writeln!(out, "{HEAVY_RULE}");

    for record in records {
        write_record(&mut out, record, colors, "   ");
    }

    write_summary(&mut out, summary, colors);
    out
}

/// Plain-text report for export, with a generation header and no colors
pub fn render_text_document(
    records: &[StatusRecord],
    summary: &ReportSummary,
    generated_at: &str,
) -> String {
    let colors = ColorScheme::plain();
    let mut out = String::new();
    let _ = writeln!(out, "LOGANIZER - ANALYSIS REPORT");
    let _ = writeln!(out, "Generated at: {generated_at}");
    let _ = writeln!(out, "Total duration: {}", format_duration(summary.wall_clock));
    out.push('\n');

    for record in records {
        write_record(&mut out, record, &colors, "");
    }

    write_summary(&mut out, summary, &colors);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FailureKind;
    use crate::reconcile::Outcome;

    fn sample_records() -> Vec<StatusRecord> {
        vec![
            StatusRecord {
                id: "a".to_string(),
                path: "f1.log".to_string(),
                log_type: "x".to_string(),
                outcome: Outcome::Success {
                    entries: 5,
                    duration: Duration::from_micros(120_400),
                },
            },
            StatusRecord {
                id: "b".to_string(),
                path: "missing.log".to_string(),
                log_type: "y".to_string(),
                outcome: Outcome::Failed {
                    kind: FailureKind::Unreadable,
                    message: "file missing.log not found or unreadable: gone".to_string(),
                },
            },
        ]
    }

    #[test]
    fn format_duration_truncates_to_millis() {
        assert_eq!(format_duration(Duration::from_micros(120_400)), "120ms");
        assert_eq!(format_duration(Duration::from_millis(1250)), "1s 250ms");
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn text_report_lists_records_and_summary() {
        let records = sample_records();
        let summary = ReportSummary::from_records(&records, Duration::from_millis(205));

        let report = render_text(&records, &summary, &ColorScheme::plain());

        assert!(report.starts_with("ANALYSIS RESULTS\n"));
        assert!(report.contains("ID: a\n   Path: f1.log\n   Type: x\n   Status: Success\n   Entries: 5\n   Duration: 120ms\n"));
        assert!(report.contains("ID: b\n"));
        assert!(report.contains("   Status: Error\n"));
        assert!(report.contains("   Error: file missing.log not found or unreadable: gone\n"));
        assert!(report.contains("Files analyzed successfully: 1/2"));
        assert!(report.contains("Total entries: 5"));
        assert!(report.contains("Total analysis time: 205ms"));
        assert!(report.contains("Average entries per file: 5.0"));
    }

    #[test]
    fn no_average_line_without_successes() {
        let records = vec![sample_records().remove(1)];
        let summary = ReportSummary::from_records(&records, Duration::from_millis(60));

        let report = render_text(&records, &summary, &ColorScheme::plain());

        assert!(report.contains("Files analyzed successfully: 0/1"));
        assert!(!report.contains("Average entries"));
    }

    #[test]
    fn document_has_header_and_no_color_codes() {
        let records = sample_records();
        let summary = ReportSummary::from_records(&records, Duration::from_millis(205));

        let document = render_text_document(&records, &summary, "2026-10-19 08:30:00");

        assert!(document.starts_with(
            "LOGANIZER - ANALYSIS REPORT\nGenerated at: 2026-10-19 08:30:00\nTotal duration: 205ms\n\n"
        ));
        assert!(document.contains("ID: a\nPath: f1.log\n"));
        assert!(!document.contains('\x1b'));
    }
}
