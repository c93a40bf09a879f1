//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads and normalizes every configured trace file
//! 2. Calculates traffic metrics
//! 3. Writes the report and optional text summary

use crate::aggregator::calculate_metrics;
use crate::commands::models::AnalyzeArgs;
use crate::output::{generate_text_summary, write_report, MetricsReport};
use crate::parser::{load_run, SourceSummary, TraceSet};
use crate::utils::config::AnalysisConfig;
use crate::utils::error::TraceError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Load traces and compute the full report for one run
///
/// **Public** - library entry point, no file output
///
/// # Errors
/// Any ingestion, schema or config failure; no partial report is produced.
pub fn run_analysis(config: &AnalysisConfig) -> Result<MetricsReport, TraceError> {
    let trace_set = load_run(config)?;
    let sources = trace_set.source_summaries();

    debug!(
        "Loaded {} records from {} files ({} PE files absent)",
        trace_set.record_count(),
        trace_set.logs.len(),
        trace_set.missing.len()
    );

    Ok(build_report(config, sources, trace_set))
}

/// Aggregate a loaded run into a report
///
/// **Private** - shared by run_analysis and execute_analyze
fn build_report(config: &AnalysisConfig, sources: Vec<SourceSummary>, trace_set: TraceSet) -> MetricsReport {
    let pe_count = trace_set.pe_count;
    let events = trace_set.into_events();
    let metrics = calculate_metrics(&events, pe_count);
    MetricsReport::new(config.clone(), sources, metrics)
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Missing interconnect trace or every PE trace missing
/// * Unrecognized trace schema
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.config.trace_dir.display());

    info!("Step 1/3: Loading traces...");
    let trace_set = load_run(&args.config).context("Failed to ingest traces")?;
    let sources = trace_set.source_summaries();
    for source in sources.iter().filter(|s| s.present) {
        debug!(
            "  {} {}: {} records, {} rejected",
            source.entity,
            source.path.display(),
            source.records,
            source.rejected_lines
        );
    }

    info!("Step 2/3: Calculating metrics over {} PEs...", trace_set.pe_count);
    let pe_count = trace_set.pe_count;
    let report = build_report(&args.config, sources, trace_set);

    info!("Bandwidth: {}", report.bandwidth_stats.summary());

    info!("Step 3/3: Writing output...");
    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TRAFFIC SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Trace dir:   {}", args.config.trace_dir.display());
        println!("PEs:         {}", pe_count);
        println!("IC events:   {}", report.interconnect_events());
        println!("\n{}", generate_text_summary(&report, args.summary_rows));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    args.config.validate()?;

    if args.summary_rows == 0 {
        anyhow::bail!("summary_rows must be greater than 0");
    }

    if args.output_json.is_none() && !args.print_summary {
        anyhow::bail!("Nothing to do: pass --output and/or --summary");
    }

    Ok(())
}
