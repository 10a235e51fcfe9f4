use crate::reconcile::StatusRecord;

/// Coarse outcome category accepted by `--filter-status`
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    Success,
    Error,
}

/// Sort keys accepted by `--sort`
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending by id
    Id,
    /// Descending by entry count
    Entries,
    /// Descending by simulated duration
    Duration,
    /// Ascending by status label
    Status,
}

/// Predicates applied to status records; all supplied ones must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring of the log type
    pub log_type: Option<String>,
    pub status: Option<StatusFilter>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.log_type.is_none() && self.status.is_none()
    }

    pub fn matches(&self, record: &StatusRecord) -> bool {
        if let Some(ref needle) = self.log_type {
            if !record
                .log_type
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        match self.status {
            Some(StatusFilter::Success) => record.outcome.is_success(),
            Some(StatusFilter::Error) => record.outcome.is_failed(),
            None => true,
        }
    }
}

/// Keep the records matching `filter`, in their original order
pub fn apply_filters(records: Vec<StatusRecord>, filter: &RecordFilter) -> Vec<StatusRecord> {
    if filter.is_empty() {
        return records;
    }
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Stable sort; equal keys keep reconciler order
pub fn sort_records(records: &mut [StatusRecord], key: SortKey) {
    match key {
        SortKey::Id => records.sort_by(|a, b| a.id.cmp(&b.id)),
        SortKey::Entries => {
            records.sort_by(|a, b| b.outcome.entries().cmp(&a.outcome.entries()))
        }
        SortKey::Duration => {
            records.sort_by(|a, b| b.outcome.duration().cmp(&a.outcome.duration()))
        }
        SortKey::Status => records.sort_by(|a, b| a.outcome.label().cmp(b.outcome.label())),
    }
}
