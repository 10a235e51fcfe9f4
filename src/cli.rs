// Command-line interface definitions
// Converted into LoganizerConfig before anything runs

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ColorMode;
use crate::reconcile::StatusTag;
use crate::report::{ReportFormat, SortKey, StatusFilter};

#[derive(Parser, Debug)]
#[command(name = "loganizer")]
#[command(about = "A concurrent log file analyzer")]
#[command(
    long_about = "A concurrent log file analyzer\n\nAnalyzes every log file listed in a JSON configuration in parallel, one worker per file,\nand reports entry counts, durations and failures.\n\nCOMMON EXAMPLES:\n  loganizer analyze -c config.json\n  loganizer analyze -c config.json -o results.txt\n  loganizer analyze -c config.json --status --sort entries\n  loganizer analyze -c config.json --filter-type nginx-access\n  loganizer add-log --file config.json --id web --path /var/log/nginx/access.log --type nginx-access\n\nSet LOGANIZER_LOG (e.g. LOGANIZER_LOG=debug) for diagnostic logging."
)]
#[command(version)]
pub struct Cli {
    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze the log files listed in a configuration file
    Analyze(AnalyzeArgs),

    /// Add a log descriptor to a configuration file
    AddLog(AddLogArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON configuration file listing {id, path, type} entries
    #[arg(short = 'c', long = "config", help_heading = "Input Options")]
    pub config: PathBuf,

    /// Save the report here; a _YYMMDD stamp is inserted before the extension (.json writes JSON)
    #[arg(short = 'o', long = "output", help_heading = "Output Options")]
    pub output: Option<PathBuf>,

    /// Only export records with this status
    #[arg(
        long = "export-status",
        value_enum,
        requires = "output",
        help_heading = "Output Options"
    )]
    pub export_status: Option<StatusTag>,

    /// Report format printed to stdout
    #[arg(
        short = 'F',
        long = "output-format",
        value_enum,
        default_value = "text",
        help_heading = "Output Options"
    )]
    pub output_format: ReportFormat,

    /// Print progress while loading and analyzing
    #[arg(long = "status", help_heading = "Output Options")]
    pub status: bool,

    /// Colorize status labels
    #[arg(
        long = "color",
        value_enum,
        default_value = "auto",
        help_heading = "Output Options"
    )]
    pub color: ColorMode,

    /// Sort records by this key
    #[arg(long = "sort", value_enum, ignore_case = true, help_heading = "Report Options")]
    pub sort: Option<SortKey>,

    /// Only show records whose type contains this text (case-insensitive)
    #[arg(long = "filter-type", help_heading = "Report Options")]
    pub filter_type: Option<String>,

    /// Only show successful or failed records
    #[arg(
        long = "filter-status",
        value_enum,
        ignore_case = true,
        help_heading = "Report Options"
    )]
    pub filter_status: Option<StatusFilter>,

    /// Lower bound of the simulated per-file latency
    #[arg(
        long = "latency-min-ms",
        default_value_t = 50,
        help_heading = "Engine Options"
    )]
    pub latency_min_ms: u64,

    /// Upper bound (exclusive) of the simulated per-file latency
    #[arg(
        long = "latency-max-ms",
        default_value_t = 200,
        help_heading = "Engine Options"
    )]
    pub latency_max_ms: u64,

    /// Probability that a readable file is reported as malformed
    #[arg(
        long = "malformed-rate",
        default_value_t = 0.1,
        help_heading = "Engine Options"
    )]
    pub malformed_rate: f64,

    /// Seed for reproducible latency and content checks
    #[arg(long = "seed", help_heading = "Engine Options")]
    pub seed: Option<u64>,

    /// Stop waiting for files after this long (e.g. 5s, 500ms); unfinished files are reported as timed out
    #[arg(
        long = "timeout",
        value_parser = humantime::parse_duration,
        help_heading = "Engine Options"
    )]
    pub timeout: Option<Duration>,
}

#[derive(Args, Debug)]
pub struct AddLogArgs {
    /// Configuration file to update
    #[arg(long = "file")]
    pub file: PathBuf,

    /// Unique log id
    #[arg(long = "id")]
    pub id: String,

    /// Path of the log file
    #[arg(long = "path")]
    pub path: String,

    /// Free-form log type, e.g. nginx-access
    #[arg(long = "type")]
    pub log_type: String,
}
