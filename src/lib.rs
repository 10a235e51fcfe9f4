// Core library for loganizer, a concurrent log file analyzer

pub mod analyzer;
pub mod cli;
pub mod colors;
pub mod config;
pub mod config_file;
pub mod decompression;
pub mod platform;
pub mod reconcile;
pub mod report;
pub mod runner;
pub mod stats;
pub mod tty;

pub use analyzer::{
    analyze_logs, AnalysisBatch, AnalysisFailure, AnalysisResult, Analyzer, EngineConfig,
    FailureKind, FixedSampler, RandomSampler, Sampler,
};
pub use config::LoganizerConfig;
pub use config_file::{ConfigError, LogDescriptor};
pub use reconcile::{reconcile, Outcome, StatusRecord, StatusTag};
pub use runner::{run_add_log, run_analysis, run_analysis_with_sampler, AnalysisRun};
