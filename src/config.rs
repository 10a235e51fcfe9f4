use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

use crate::analyzer::EngineConfig;
use crate::cli::AnalyzeArgs;
use crate::report::{ExportRequest, RecordFilter, ReportFormat, SortKey};

/// Main configuration struct for one `analyze` run
#[derive(Debug, Clone)]
pub struct LoganizerConfig {
    pub input: InputConfig,
    pub engine: EngineSettings,
    pub report: ReportConfig,
    pub output: OutputConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// JSON file listing the log descriptors
    pub config_path: PathBuf,
}

/// Engine configuration plus the randomness seed
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub engine: EngineConfig,
    /// Fixed seed for reproducible latency and content checks
    pub seed: Option<u64>,
}

/// Post-processing of reconciled records
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub filter: RecordFilter,
    pub sort: Option<SortKey>,
    pub export: Option<ExportRequest>,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: ReportFormat,
    pub color: ColorMode,
    /// Print progress lines on stderr
    pub show_status: bool,
}

/// Color output mode
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl LoganizerConfig {
    /// Create configuration from `analyze` arguments, rejecting invalid combinations
    pub fn from_analyze_args(args: &AnalyzeArgs) -> Result<Self> {
        let latency_min = Duration::from_millis(args.latency_min_ms);
        let latency_max = Duration::from_millis(args.latency_max_ms);
        if latency_min > latency_max {
            bail!(
                "--latency-min-ms ({}) must not exceed --latency-max-ms ({})",
                args.latency_min_ms,
                args.latency_max_ms
            );
        }

        if !(0.0..=1.0).contains(&args.malformed_rate) {
            bail!(
                "--malformed-rate must be between 0 and 1, got {}",
                args.malformed_rate
            );
        }

        if args.timeout == Some(Duration::ZERO) {
            bail!("--timeout must be greater than zero");
        }

        let log_type = args
            .filter_type
            .as_ref()
            .filter(|s| !s.is_empty())
            .cloned();

        Ok(Self {
            input: InputConfig {
                config_path: args.config.clone(),
            },
            engine: EngineSettings {
                engine: EngineConfig {
                    latency_min,
                    latency_max,
                    malformed_rate: args.malformed_rate,
                    timeout: args.timeout,
                },
                seed: args.seed,
            },
            report: ReportConfig {
                filter: RecordFilter {
                    log_type,
                    status: args.filter_status,
                },
                sort: args.sort,
                export: args.output.as_ref().map(|path| ExportRequest {
                    path: path.clone(),
                    status: args.export_status,
                }),
            },
            output: OutputConfig {
                format: args.output_format,
                color: args.color,
                show_status: args.status,
            },
        })
    }

    pub fn use_colors(&self) -> bool {
        crate::tty::should_use_colors_with_mode(&self.output.color)
    }
}
