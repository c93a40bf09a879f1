use crate::output::read_report;
use crate::utils::config::{REPORT_SCHEMA_VERSION, TABULAR_COLUMNS};
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    if report.traffic_by_entity.len() != report.config.pe_count {
        anyhow::bail!(
            "Report lists {} PEs but was generated for {}",
            report.traffic_by_entity.len(),
            report.config.pe_count
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  PEs: {}", report.config.pe_count);
    println!("  Sources: {}", report.sources.len());
    println!("  Active cycles: {}", report.bandwidth_by_time.len());
    println!("  Message types: {}", report.message_types.len());
    println!("  Interconnect events: {}", report.interconnect_events());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("IC Trace Metrics Report Schema");
    println!("Current Version: {}", REPORT_SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Input Formats:");
        println!("  fixed-field: header line, then `<messageType> <0|1> <size> <endpoint> <cycle>`");
        println!("               (1 = sent, 0 = received), one file per entity");
        println!("  tabular:     header `{}`, one row per event", TABULAR_COLUMNS.join(","));
        println!();
        println!("Report Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string       - ISO 8601 timestamp");
        println!("  config: object             - Run configuration");
        println!("  sources: array             - Per-file ingestion accounting");
        println!("    records: number          - Accepted records");
        println!("    rejected_lines: number   - Malformed lines skipped");
        println!("  bandwidth_by_time: object  - Cycle -> interconnect bytes");
        println!("  traffic_by_entity: object  - PE index -> byte totals");
        println!("    sent: number             - Bytes sent");
        println!("    received: number         - Bytes received");
        println!("    transferred: number      - Undirected bytes (tabular logs)");
        println!("  message_types: object      - Message type -> interconnect event count");
        println!("  bandwidth_stats: object    - Total, peak and mean bandwidth");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("IC Trace Metrics v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Traffic metrics for multi-core interconnect simulator traces.");
}
