use clap::Parser;
use tracing_subscriber::EnvFilter;

use loganizer::cli::{Cli, Command};
use loganizer::config::LoganizerConfig;
use loganizer::platform::{ExitCode, SafeStdout};
use loganizer::runner::{run_add_log, run_analysis};

/// Environment variable holding the tracing filter directives
const LOG_ENV: &str = "LOGANIZER_LOG";

fn init_tracing(verbose: u8) {
    // -v overrides the environment, otherwise LOGANIZER_LOG, otherwise warn
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze(args) => {
            let config = match LoganizerConfig::from_analyze_args(&args) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("loganizer: Error: {:#}", e);
                    ExitCode::InvalidUsage.exit();
                }
            };

            let mut stdout = SafeStdout::new();
            if let Err(e) = run_analysis(&config, &mut stdout) {
                eprintln!("loganizer: Error: {:#}", e);
                ExitCode::GeneralError.exit();
            }
        }
        Command::AddLog(args) => {
            let mut stdout = SafeStdout::new();
            if let Err(e) = run_add_log(&args, &mut stdout) {
                eprintln!("loganizer: Error: {:#}", e);
                ExitCode::GeneralError.exit();
            }
        }
    }

    ExitCode::Success.exit();
}
