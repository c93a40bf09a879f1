//! Plain-text summary tables for the terminal.

use super::schema::MetricsReport;
use crate::aggregator::{busiest_pe, ranked_message_types, roster_totals};
use crate::parser::schema::MessageKind;

/// Width of the longest bandwidth bar
const BAR_WIDTH: u64 = 40;

/// Render a text summary of a report
///
/// **Public** - printed by `analyze --summary`
///
/// # Arguments
/// * `report` - Report to summarize
/// * `max_rows` - Maximum rows in the bandwidth and message type tables
pub fn generate_text_summary(report: &MetricsReport, max_rows: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  INTERCONNECT BANDWIDTH".to_string());
    lines.push(format!("  {}", report.bandwidth_stats.summary()));
    lines.push(format!(
        "  Utilization: {:.1}% of observed cycles",
        report.bandwidth_stats.utilization() * 100.0
    ));
    lines.push(String::new());

    let peak = report.bandwidth_stats.peak_bytes.max(1);
    for (cycle, bytes) in report.bandwidth_by_time.iter().take(max_rows) {
        let bar = "█".repeat((u128::from(*bytes) * u128::from(BAR_WIDTH) / u128::from(peak)) as usize);
        lines.push(format!("  {:>8} │ {:<40} {:>10}", cycle, bar, bytes));
    }
    if report.bandwidth_by_time.len() > max_rows {
        lines.push(format!(
            "  ... {} more cycles",
            report.bandwidth_by_time.len() - max_rows
        ));
    }

    lines.push(String::new());
    lines.push("  TRAFFIC PER PE".to_string());
    lines.push(format!(
        "  {:<6} {:>12} {:>12} {:>12} {:>12}",
        "PE", "SENT", "RECEIVED", "TRANSFERRED", "TOTAL"
    ));
    for (index, totals) in &report.traffic_by_entity {
        lines.push(format!(
            "  {:<6} {:>12} {:>12} {:>12} {:>12}",
            format!("PE{}", index),
            totals.sent,
            totals.received,
            totals.transferred,
            totals.total()
        ));
    }
    let all = roster_totals(&report.traffic_by_entity);
    lines.push(format!(
        "  {:<6} {:>12} {:>12} {:>12} {:>12}",
        "ALL",
        all.sent,
        all.received,
        all.transferred,
        all.total()
    ));
    if let Some((index, totals)) = busiest_pe(&report.traffic_by_entity) {
        lines.push(format!("  Busiest: PE{} ({} bytes)", index, totals.total()));
    }

    lines.push(String::new());
    lines.push("  MESSAGE TYPES".to_string());
    let total_events = report.interconnect_events().max(1);
    for (label, count) in ranked_message_types(&report.message_types).into_iter().take(max_rows) {
        let kind = MessageKind::classify(label);
        lines.push(format!(
            "  {:<24} {:>10} {:>6.1}%  {}",
            label,
            count,
            (count as f64 / total_events as f64) * 100.0,
            kind.description()
        ));
    }

    if report.rejected_lines() > 0 {
        lines.push(String::new());
        lines.push(format!(
            "  {} malformed trace lines were skipped",
            report.rejected_lines()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{TrafficMetrics, TrafficTotals};
    use crate::utils::config::AnalysisConfig;
    use std::collections::BTreeMap;

    #[test]
    fn test_summary_lists_every_pe() {
        let metrics = TrafficMetrics {
            bandwidth_by_time: BTreeMap::from([(0, 96), (1, 16)]),
            traffic_by_entity: BTreeMap::from([
                (0, TrafficTotals { sent: 64, received: 8, transferred: 0 }),
                (1, TrafficTotals::default()),
                (2, TrafficTotals::default()),
            ]),
            message_types: BTreeMap::from([("READ_MEM".to_string(), 3)]),
        };
        let report = MetricsReport::new(AnalysisConfig::default().with_pe_count(3), Vec::new(), metrics);

        let text = generate_text_summary(&report, 10);
        assert!(text.contains("PE0"));
        assert!(text.contains("PE2"));
        assert!(text.contains("Busiest: PE0 (72 bytes)"));
        assert!(text.contains("memory read request"));
    }

    #[test]
    fn test_summary_handles_max_cycle_bytes() {
        let metrics = TrafficMetrics {
            bandwidth_by_time: BTreeMap::from([(0, u64::MAX), (1, u64::MAX / 2)]),
            traffic_by_entity: BTreeMap::new(),
            message_types: BTreeMap::from([("MSG_A".to_string(), u64::MAX), ("MSG_B".to_string(), 1)]),
        };
        let report = MetricsReport::new(AnalysisConfig::default(), Vec::new(), metrics);

        let text = generate_text_summary(&report, 5);
        assert!(text.contains(&"█".repeat(40)));
        assert_eq!(report.interconnect_events(), u64::MAX);
    }

    #[test]
    fn test_summary_truncates_cycles() {
        let metrics = TrafficMetrics {
            bandwidth_by_time: (0..20).map(|t| (t, 10)).collect(),
            traffic_by_entity: BTreeMap::new(),
            message_types: BTreeMap::new(),
        };
        let report = MetricsReport::new(AnalysisConfig::default(), Vec::new(), metrics);

        let text = generate_text_summary(&report, 5);
        assert!(text.contains("... 15 more cycles"));
    }
}
