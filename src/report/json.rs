use serde::Serialize;

use crate::reconcile::{StatusRecord, StatusTag};

/// One entry of the structured report; field order is part of the format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredEntry {
    pub log_id: String,
    pub file_path: String,
    pub status: StatusTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&StatusRecord> for StructuredEntry {
    fn from(record: &StatusRecord) -> Self {
        Self {
            log_id: record.id.clone(),
            file_path: record.path.clone(),
            status: record.outcome.tag(),
            entries: record
                .outcome
                .is_success()
                .then(|| record.outcome.entries()),
            error: record.outcome.error_message().map(str::to_string),
        }
    }
}

/// Structured entries, optionally narrowed to a single status tag
pub fn build_structured(records: &[StatusRecord], status: Option<StatusTag>) -> Vec<StructuredEntry> {
    records
        .iter()
        .filter(|r| status.map_or(true, |tag| r.outcome.tag() == tag))
        .map(StructuredEntry::from)
        .collect()
}

/// Pretty-printed JSON array of structured entries
pub fn render_json(entries: &[StructuredEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}
