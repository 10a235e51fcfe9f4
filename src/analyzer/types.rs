//! Type definitions for the analysis engine
//!
//! Contains the per-file outcome types, the batch container and the engine
//! configuration.

use std::fmt;
use std::io;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Default lower bound of the simulated per-file latency
pub const DEFAULT_LATENCY_MIN: Duration = Duration::from_millis(50);
/// Default (exclusive) upper bound of the simulated per-file latency
pub const DEFAULT_LATENCY_MAX: Duration = Duration::from_millis(200);
/// Default probability that the content check rejects a file
pub const DEFAULT_MALFORMED_RATE: f64 = 0.1;

/// Configuration for one engine instance
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub latency_min: Duration,
    pub latency_max: Duration,
    pub malformed_rate: f64,
    /// Stop waiting for stragglers after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            latency_min: DEFAULT_LATENCY_MIN,
            latency_max: DEFAULT_LATENCY_MAX,
            malformed_rate: DEFAULT_MALFORMED_RATE,
            timeout: None,
        }
    }
}

/// Statistics for one successfully analyzed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub file_path: String,
    pub entry_count: usize,
    /// Simulated latency spent on this file
    pub duration: Duration,
}

/// Why a single file could not be analyzed
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    #[error("file {file_path} not found or unreadable: {source}")]
    Unreadable {
        file_path: String,
        #[source]
        source: io::Error,
    },

    #[error("parsing error for file {file_path}")]
    Malformed { file_path: String },

    #[error("analysis of file {file_path} timed out after {}", humantime::format_duration(*.waited))]
    TimedOut { file_path: String, waited: Duration },

    #[error("analysis of file {file_path} aborted: {reason}")]
    Aborted { file_path: String, reason: String },
}

/// Coarse category of an [`AnalysisFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Unreadable,
    Malformed,
    TimedOut,
    Aborted,
}

impl AnalysisFailure {
    pub fn file_path(&self) -> &str {
        match self {
            AnalysisFailure::Unreadable { file_path, .. }
            | AnalysisFailure::Malformed { file_path }
            | AnalysisFailure::TimedOut { file_path, .. }
            | AnalysisFailure::Aborted { file_path, .. } => file_path,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisFailure::Unreadable { .. } => FailureKind::Unreadable,
            AnalysisFailure::Malformed { .. } => FailureKind::Malformed,
            AnalysisFailure::TimedOut { .. } => FailureKind::TimedOut,
            AnalysisFailure::Aborted { .. } => FailureKind::Aborted,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Unreadable => "unreadable",
            FailureKind::Malformed => "malformed",
            FailureKind::TimedOut => "timed_out",
            FailureKind::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Everything one engine call produced
#[derive(Debug, Default)]
pub struct AnalysisBatch {
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<AnalysisFailure>,
    /// Wall-clock time of the whole engine call
    pub elapsed: Duration,
}

impl AnalysisBatch {
    /// Number of outcomes, successes and failures together
    pub fn len(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_entries(&self) -> usize {
        self.results.iter().map(|r| r.entry_count).sum()
    }
}

/// Everything a unit needs, decided up front on the calling thread
#[derive(Debug, Clone)]
pub(crate) struct UnitPlan {
    pub index: usize,
    pub path: String,
    pub latency: Duration,
    pub malformed: bool,
}

/// Message sent from a unit back to the collector, tagged with its input index
pub(crate) type Tagged<T> = (usize, T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_accessors_match_variant() {
        let failure = AnalysisFailure::Unreadable {
            file_path: "missing.log".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(failure.file_path(), "missing.log");
        assert_eq!(failure.kind(), FailureKind::Unreadable);

        let failure = AnalysisFailure::Malformed {
            file_path: "bad.log".to_string(),
        };
        assert_eq!(failure.file_path(), "bad.log");
        assert_eq!(failure.kind(), FailureKind::Malformed);
    }

    #[test]
    fn unreadable_message_keeps_cause() {
        let failure = AnalysisFailure::Unreadable {
            file_path: "missing.log".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let message = failure.to_string();
        assert!(message.contains("missing.log"));
        assert!(message.contains("unreadable"));
        assert!(message.contains("no such file"));
        assert!(std::error::Error::source(&failure).is_some());
    }

    #[test]
    fn timed_out_message_uses_human_duration() {
        let failure = AnalysisFailure::TimedOut {
            file_path: "slow.log".to_string(),
            waited: Duration::from_millis(1500),
        };
        assert_eq!(
            failure.to_string(),
            "analysis of file slow.log timed out after 1s 500ms"
        );
        assert_eq!(failure.kind().to_string(), "timed_out");
    }

    #[test]
    fn batch_counts() {
        let batch = AnalysisBatch {
            results: vec![
                AnalysisResult {
                    file_path: "a.log".to_string(),
                    entry_count: 3,
                    duration: Duration::ZERO,
                },
                AnalysisResult {
                    file_path: "b.log".to_string(),
                    entry_count: 4,
                    duration: Duration::ZERO,
                },
            ],
            failures: vec![AnalysisFailure::Malformed {
                file_path: "c.log".to_string(),
            }],
            elapsed: Duration::ZERO,
        };
        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
        assert_eq!(batch.total_entries(), 7);
        assert!(AnalysisBatch::default().is_empty());
    }
}
