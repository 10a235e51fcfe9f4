//! Report building, filtering, sorting and rendering
//!
//! Everything here is a pure transformation over reconciled
//! [`StatusRecord`](crate::reconcile::StatusRecord)s, except `export`, which
//! writes the rendered report to disk.

mod export;
mod filter;
mod json;
mod text;

pub use export::{export_report, timestamped_path, ExportFormat, ExportRequest};
pub use filter::{apply_filters, sort_records, RecordFilter, SortKey, StatusFilter};
pub use json::{build_structured, render_json, StructuredEntry};
pub use text::{format_duration, render_text, render_text_document};

/// What gets printed to stdout after an analysis
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}
