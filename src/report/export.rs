use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

use super::json::{build_structured, render_json};
use super::text::render_text_document;
use crate::reconcile::{StatusRecord, StatusTag};
use crate::stats::ReportSummary;

/// On-disk report format, chosen by the output file's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Text,
        }
    }
}

/// Where and what to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Requested path, before the date stamp is inserted
    pub path: PathBuf,
    /// Only write records with this status tag
    pub status: Option<StatusTag>,
}

/// Insert a `_YYMMDD` stamp before the extension: `out/report.json` -> `out/report_261019.json`
///
/// The extension starts at the last dot of the file name, so a dotfile such
/// as `.report` becomes `_261019.report`.
pub fn timestamped_path(path: &Path, date: NaiveDate) -> PathBuf {
    let stamp = date.format("%y%m%d");
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (stem, ext) = match file_name.rfind('.') {
        Some(dot) => file_name.split_at(dot),
        None => (file_name.as_str(), ""),
    };
    path.with_file_name(format!("{stem}_{stamp}{ext}"))
}

/// Render and write the report, returning the path actually written
pub fn export_report(
    request: &ExportRequest,
    records: &[StatusRecord],
    summary: &ReportSummary,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let target = timestamped_path(&request.path, now.date_naive());

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let content = match ExportFormat::from_path(&target) {
        ExportFormat::Json => {
            let entries = build_structured(records, request.status);
            render_json(&entries).context("Failed to serialize report")?
        }
        ExportFormat::Text => {
            let narrowed: Vec<StatusRecord> = records
                .iter()
                .filter(|r| request.status.map_or(true, |tag| r.outcome.tag() == tag))
                .cloned()
                .collect();
            let narrowed_summary = ReportSummary::from_records(&narrowed, summary.wall_clock);
            let generated_at = now.format("%Y-%m-%d %H:%M:%S").to_string();
            render_text_document(&narrowed, &narrowed_summary, &generated_at)
        }
    };

    fs::write(&target, content)
        .with_context(|| format!("Failed to write report to {}", target.display()))?;

    tracing::info!(path = %target.display(), "report exported");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FailureKind;
    use crate::reconcile::Outcome;
    use chrono::TimeZone;
    use std::time::Duration;
    use tempfile::TempDir;

    fn records() -> Vec<StatusRecord> {
        vec![
            StatusRecord {
                id: "a".to_string(),
                path: "f1.log".to_string(),
                log_type: "x".to_string(),
                outcome: Outcome::Success {
                    entries: 5,
                    duration: Duration::from_millis(80),
                },
            },
            StatusRecord {
                id: "b".to_string(),
                path: "missing.log".to_string(),
                log_type: "y".to_string(),
                outcome: Outcome::Failed {
                    kind: FailureKind::Unreadable,
                    message: "file missing.log not found or unreadable".to_string(),
                },
            },
        ]
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn stamp_goes_before_extension() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            timestamped_path(Path::new("results.txt"), date),
            PathBuf::from("results_261019.txt")
        );
        assert_eq!(
            timestamped_path(Path::new("out/reports/run.json"), date),
            PathBuf::from("out/reports/run_261019.json")
        );
        assert_eq!(
            timestamped_path(Path::new("report"), date),
            PathBuf::from("report_261019")
        );
    }

    #[test]
    fn dotfile_is_all_extension() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            timestamped_path(Path::new("out/.report"), date),
            PathBuf::from("out/_261019.report")
        );
        assert_eq!(
            timestamped_path(Path::new("logs.tar.gz"), date),
            PathBuf::from("logs.tar_261019.gz")
        );
        assert_eq!(
            ExportFormat::from_path(&timestamped_path(Path::new(".json"), date)),
            ExportFormat::Json
        );
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("a.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("a.txt")), ExportFormat::Text);
        assert_eq!(ExportFormat::from_path(Path::new("a")), ExportFormat::Text);
    }

    #[test]
    fn json_export_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let request = ExportRequest {
            path: dir.path().join("nested/deeper/report.json"),
            status: None,
        };
        let records = records();
        let summary = ReportSummary::from_records(&records, Duration::from_millis(200));

        let written = export_report(&request, &records, &summary, fixed_now()).unwrap();

        assert_eq!(written, dir.path().join("nested/deeper/report_261019.json"));
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["status"], "OK");
        assert_eq!(value[1]["status"], "FAILED");
    }

    #[test]
    fn status_filter_narrows_export() {
        let dir = TempDir::new().unwrap();
        let request = ExportRequest {
            path: dir.path().join("failed.json"),
            status: Some(StatusTag::Failed),
        };
        let records = records();
        let summary = ReportSummary::from_records(&records, Duration::from_millis(200));

        let written = export_report(&request, &records, &summary, fixed_now()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["log_id"], "b");
    }

    #[test]
    fn text_export_has_header() {
        let dir = TempDir::new().unwrap();
        let request = ExportRequest {
            path: dir.path().join("report.txt"),
            status: None,
        };
        let records = records();
        let summary = ReportSummary::from_records(&records, Duration::from_millis(200));

        let written = export_report(&request, &records, &summary, fixed_now()).unwrap();

        let content = fs::read_to_string(written).unwrap();
        assert!(content.starts_with("LOGANIZER - ANALYSIS REPORT\nGenerated at: 2026-10-19 08:30:00\n"));
        assert!(content.contains("ID: b\n"));
        assert!(content.contains("Files analyzed successfully: 1/2"));
    }
}
