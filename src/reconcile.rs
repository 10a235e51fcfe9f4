//! Joins configured descriptors with engine outcomes
//!
//! The engine returns outcomes in completion order. Reconciliation restores
//! descriptor order, which is the only ordering callers may rely on.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::analyzer::{AnalysisFailure, AnalysisResult, FailureKind};
use crate::config_file::LogDescriptor;

/// Resolved state of one descriptor after analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { entries: usize, duration: Duration },
    Failed { kind: FailureKind, message: String },
    /// The path was never submitted to the engine
    NotProcessed,
}

/// Literal status tag used in structured reports and export filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum StatusTag {
    #[serde(rename = "OK")]
    #[value(name = "OK")]
    Ok,
    #[serde(rename = "FAILED")]
    #[value(name = "FAILED")]
    Failed,
    #[serde(rename = "NOT_PROCESSED")]
    #[value(name = "NOT_PROCESSED")]
    NotProcessed,
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusTag::Ok => "OK",
            StatusTag::Failed => "FAILED",
            StatusTag::NotProcessed => "NOT_PROCESSED",
        })
    }
}

impl Outcome {
    /// Human-readable label, also the key for status sorting
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "Success",
            Outcome::Failed { .. } => "Error",
            Outcome::NotProcessed => "Not processed",
        }
    }

    pub fn tag(&self) -> StatusTag {
        match self {
            Outcome::Success { .. } => StatusTag::Ok,
            Outcome::Failed { .. } => StatusTag::Failed,
            Outcome::NotProcessed => StatusTag::NotProcessed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// Entry count, zero unless successful
    pub fn entries(&self) -> usize {
        match self {
            Outcome::Success { entries, .. } => *entries,
            _ => 0,
        }
    }

    /// Simulated duration, zero unless successful
    pub fn duration(&self) -> Duration {
        match self {
            Outcome::Success { duration, .. } => *duration,
            _ => Duration::ZERO,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// One descriptor joined with its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    pub id: String,
    pub path: String,
    pub log_type: String,
    pub outcome: Outcome,
}

/// Resolve every descriptor, in order, against the engine's outcomes
///
/// Paths are the join key. When a path has both a result and a failure
/// (possible only with duplicated paths), the result wins. Within each
/// lookup the first outcome for a path is used.
pub fn reconcile(
    descriptors: &[LogDescriptor],
    results: &[AnalysisResult],
    failures: &[AnalysisFailure],
) -> Vec<StatusRecord> {
    let mut result_by_path: HashMap<&str, &AnalysisResult> = HashMap::new();
    for result in results {
        result_by_path.entry(result.file_path.as_str()).or_insert(result);
    }

    let mut failure_by_path: HashMap<&str, &AnalysisFailure> = HashMap::new();
    for failure in failures {
        failure_by_path.entry(failure.file_path()).or_insert(failure);
    }

    descriptors
        .iter()
        .map(|descriptor| {
            let path = descriptor.path.as_str();
            let outcome = if let Some(result) = result_by_path.get(path) {
                Outcome::Success {
                    entries: result.entry_count,
                    duration: result.duration,
                }
            } else if let Some(failure) = failure_by_path.get(path) {
                Outcome::Failed {
                    kind: failure.kind(),
                    message: failure.to_string(),
                }
            } else {
                tracing::warn!(id = %descriptor.id, path, "descriptor has no analysis outcome");
                Outcome::NotProcessed
            };

            StatusRecord {
                id: descriptor.id.clone(),
                path: descriptor.path.clone(),
                log_type: descriptor.log_type.clone(),
                outcome,
            }
        })
        .collect()
}
