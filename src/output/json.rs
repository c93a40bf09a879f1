//! Metrics report persistence.
//!
//! Reports are pretty-printed so cycle and PE keys stay diffable between
//! runs. The same document is read back by `ic-trace validate`.

use super::prepare_output_path;
use super::schema::MetricsReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &MetricsReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Write a report to `output_path`, creating parent directories
///
/// **Public** - step 3 of `analyze`
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::SerializationFailed` - Report could not be encoded
/// * `OutputError::WriteFailed` - File could not be written
pub fn write_report(report: &MetricsReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    prepare_output_path(output_path)?;

    let json = report_to_string(report)?;
    fs::write(output_path, &json)?;

    info!(
        "Wrote report for {} PEs to {} ({} bytes)",
        report.traffic_by_entity.len(),
        output_path.display(),
        json.len()
    );
    Ok(())
}

/// Load a report previously written by `write_report`
///
/// # Errors
/// * `OutputError::ReadFailed` - File could not be read
/// * `OutputError::SerializationFailed` - File is not a metrics report
pub fn read_report(input_path: impl AsRef<Path>) -> Result<MetricsReport, OutputError> {
    let input_path = input_path.as_ref();

    let json = fs::read_to_string(input_path).map_err(|source| OutputError::ReadFailed {
        path: input_path.to_path_buf(),
        source,
    })?;
    let report: MetricsReport = serde_json::from_str(&json)?;

    debug!(
        "Read report {} (schema {}, {} cycles)",
        input_path.display(),
        report.version,
        report.bandwidth_by_time.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{TrafficMetrics, TrafficTotals};
    use crate::utils::config::AnalysisConfig;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn two_pe_report() -> MetricsReport {
        let metrics = TrafficMetrics {
            bandwidth_by_time: BTreeMap::from([(0, 96), (1, 16)]),
            traffic_by_entity: BTreeMap::from([
                (0, TrafficTotals { sent: 64, received: 8, transferred: 0 }),
                (1, TrafficTotals::default()),
            ]),
            message_types: BTreeMap::from([("MSG_A".to_string(), 2), ("MSG_B".to_string(), 1)]),
        };
        MetricsReport::new(AnalysisConfig::default().with_pe_count(2), Vec::new(), metrics)
    }

    #[test]
    fn test_report_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs/a/report.json");
        let report = two_pe_report();

        write_report(&report, &path).unwrap();
        let loaded = read_report(&path).unwrap();

        assert_eq!(loaded.traffic_by_entity, report.traffic_by_entity);
        assert_eq!(loaded.bandwidth_by_time, report.bandwidth_by_time);
        assert_eq!(loaded.message_types, report.message_types);
        assert_eq!(loaded.config.pe_count, 2);
    }

    #[test]
    fn test_directory_is_not_a_report_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_report(&two_pe_report(), dir.path()).unwrap_err();
        assert!(matches!(err, OutputError::InvalidPath(_)));
    }

    #[test]
    fn test_read_missing_report() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_report(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, OutputError::ReadFailed { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_cycles_are_json_object_keys() {
        let json = report_to_string(&two_pe_report()).unwrap();
        assert!(json.contains("\"0\": 96"));
        assert!(json.contains("\"MSG_A\": 2"));
    }
}
