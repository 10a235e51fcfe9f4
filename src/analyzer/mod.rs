//! Concurrent analysis engine for loganizer
//!
//! Launches one thread per configured log file, each of which sleeps for a
//! simulated latency, counts the file's lines and runs a probabilistic content
//! check. Outcomes come back on two channels, successes and failures, and the
//! engine returns only when every unit has reported.
//!
//! # Module Structure
//!
//! - `types`: Outcome types, batch container and engine configuration
//! - `sampler`: Injected randomness for latency and content checks
//! - `worker`: The per-file unit of work
//! - `engine`: Fan-out, fan-in and the optional deadline

mod engine;
mod sampler;
mod types;
mod worker;

pub use engine::{analyze_logs, Analyzer};
pub use sampler::{FixedSampler, RandomSampler, Sampler};
pub use types::{
    AnalysisBatch, AnalysisFailure, AnalysisResult, EngineConfig, FailureKind,
    DEFAULT_LATENCY_MAX, DEFAULT_LATENCY_MIN, DEFAULT_MALFORMED_RATE,
};
