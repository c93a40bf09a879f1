//! IC Trace Metrics CLI
//!
//! Reads interconnect and PE traces written by the multi-core simulator
//! and reports bandwidth, per-PE traffic and message type metrics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use ic_trace_metrics::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs, ConfigOverrides,
};
use ic_trace_metrics::utils::config::{load_config, AnalysisConfig, SchemaHint};

/// IC Trace Metrics - traffic analysis for interconnect simulator traces
#[derive(Parser, Debug)]
#[command(name = "ic-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a directory of simulator traces
    Analyze {
        /// Directory holding the trace files
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Number of PEs in the roster
        #[arg(short, long)]
        pes: Option<usize>,

        /// Interconnect trace file name
        #[arg(long)]
        interconnect: Option<String>,

        /// PE trace file name template ({} is the PE index)
        #[arg(long)]
        pe_template: Option<String>,

        /// Combined tabular log to analyze instead of per-entity files
        #[arg(long)]
        combined: Option<String>,

        /// Trace schema (detected from the header by default; tabular needs --combined)
        #[arg(long, value_enum)]
        schema: Option<SchemaHint>,

        /// TOML run configuration; flags override its values
        #[arg(short, long, env = "IC_TRACE_CONFIG")]
        config: Option<PathBuf>,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Skip writing the JSON report
        #[arg(long)]
        no_output: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Maximum rows per summary table
        #[arg(long, default_value = "20")]
        rows: usize,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            dir,
            pes,
            interconnect,
            pe_template,
            combined,
            schema,
            config,
            output,
            no_output,
            summary,
            rows,
        } => {
            let base = match config {
                Some(path) => load_config(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => AnalysisConfig::default(),
            };

            let overrides = ConfigOverrides {
                trace_dir: dir,
                pe_count: pes,
                interconnect_file: interconnect,
                pe_file_template: pe_template,
                combined_file: combined,
                schema_hint: schema,
            };

            let args = AnalyzeArgs {
                config: overrides.apply(base),
                output_json: if no_output { None } else { Some(output) },
                print_summary: summary,
                summary_rows: rows,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
