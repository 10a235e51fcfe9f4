//! Command execution module
//!
//! Drives one `analyze` run from configuration file to rendered report, and
//! the `add-log` config update.

use anyhow::{Context, Result};
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;

use crate::analyzer::{Analyzer, RandomSampler, Sampler};
use crate::cli::AddLogArgs;
use crate::colors::ColorScheme;
use crate::config::LoganizerConfig;
use crate::config_file::{self, LogDescriptor};
use crate::reconcile::{reconcile, StatusRecord};
use crate::report::{
    apply_filters, build_structured, export_report, render_json, render_text, sort_records,
    ReportFormat,
};
use crate::stats::ReportSummary;

/// Everything an `analyze` run produced
#[derive(Debug)]
pub struct AnalysisRun {
    /// Records after filtering and sorting, as displayed
    pub records: Vec<StatusRecord>,
    pub summary: ReportSummary,
    /// Path the report was exported to, if requested
    pub exported: Option<PathBuf>,
}

fn progress(config: &LoganizerConfig, message: &str) {
    if config.output.show_status {
        eprintln!("{}", message);
    }
}

/// Run `analyze` with the sampler described by the configuration
pub fn run_analysis<W: Write>(config: &LoganizerConfig, output: &mut W) -> Result<AnalysisRun> {
    let mut sampler = RandomSampler::from_config(config.engine.seed, &config.engine.engine);
    run_analysis_with_sampler(config, &mut sampler, output)
}

/// Run `analyze` with an explicit sampler
pub fn run_analysis_with_sampler<W: Write, S: Sampler + ?Sized>(
    config: &LoganizerConfig,
    sampler: &mut S,
    output: &mut W,
) -> Result<AnalysisRun> {
    let config_path = &config.input.config_path;
    progress(
        config,
        &format!("Loading configuration from {}...", config_path.display()),
    );

    let descriptors = config_file::load_descriptors(config_path)
        .context("Failed to load configuration")?;
    progress(config, &format!("{} configurations loaded", descriptors.len()));

    let paths: Vec<String> = descriptors.iter().map(|d| d.path.clone()).collect();
    progress(config, &format!("Analyzing {} files...", paths.len()));

    let batch = Analyzer::new(config.engine.engine.clone()).analyze(&paths, sampler);

    let records = reconcile(&descriptors, &batch.results, &batch.failures);
    let mut records = apply_filters(records, &config.report.filter);
    if let Some(key) = config.report.sort {
        sort_records(&mut records, key);
    }

    let summary = ReportSummary::from_records(&records, batch.elapsed);
    progress(config, &summary.format_stats());

    match config.output.format {
        ReportFormat::Text => {
            let colors = ColorScheme::new(config.use_colors());
            write!(output, "{}", render_text(&records, &summary, &colors))?;
        }
        ReportFormat::Json => {
            let json = render_json(&build_structured(&records, None))
                .context("Failed to serialize report")?;
            writeln!(output, "{}", json)?;
        }
    }

    let exported = match config.report.export {
        Some(ref request) => {
            let path = export_report(request, &records, &summary, Local::now())?;
            // Keep stdout parseable in JSON mode
            match config.output.format {
                ReportFormat::Text => writeln!(output, "\nResults saved to: {}", path.display())?,
                ReportFormat::Json => eprintln!("Results saved to: {}", path.display()),
            }
            Some(path)
        }
        None => None,
    };

    output.flush()?;

    Ok(AnalysisRun {
        records,
        summary,
        exported,
    })
}

/// Run `add-log`: append one descriptor to an existing configuration file
pub fn run_add_log<W: Write>(args: &AddLogArgs, output: &mut W) -> Result<()> {
    let descriptor = LogDescriptor::new(args.id.clone(), args.path.clone(), args.log_type.clone());
    config_file::append_descriptor(&args.file, descriptor)
        .with_context(|| format!("Failed to add log '{}'", args.id))?;

    writeln!(output, "Log '{}' added to {}", args.id, args.file.display())?;
    output.flush()?;
    Ok(())
}
