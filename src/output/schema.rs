//! Output JSON schema for metrics reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{BandwidthByTime, BandwidthStats, MessageTypeCounts, TrafficByEntity, TrafficMetrics};
use crate::parser::loader::SourceSummary;
use crate::utils::config::{AnalysisConfig, REPORT_SCHEMA_VERSION};
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Configuration the run was loaded with
    pub config: AnalysisConfig,

    /// Ingestion accounting per trace source
    pub sources: Vec<SourceSummary>,

    /// Interconnect bytes per cycle (keys are cycles)
    pub bandwidth_by_time: BandwidthByTime,

    /// Bytes per PE (keys are roster indices)
    pub traffic_by_entity: TrafficByEntity,

    /// Interconnect event count per message type
    pub message_types: MessageTypeCounts,

    pub bandwidth_stats: BandwidthStats,
}

impl MetricsReport {
    /// Assemble a report from a finished run
    pub fn new(config: AnalysisConfig, sources: Vec<SourceSummary>, metrics: TrafficMetrics) -> Self {
        use chrono::Utc;

        let bandwidth_stats = BandwidthStats::from_series(&metrics.bandwidth_by_time);

        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            config,
            sources,
            bandwidth_by_time: metrics.bandwidth_by_time,
            traffic_by_entity: metrics.traffic_by_entity,
            message_types: metrics.message_types,
            bandwidth_stats,
        }
    }

    /// Total interconnect events counted in the type distribution
    pub fn interconnect_events(&self) -> u64 {
        self.message_types
            .values()
            .fold(0u64, |acc, &count| acc.saturating_add(count))
    }

    /// Total lines dropped across all sources
    pub fn rejected_lines(&self) -> usize {
        self.sources.iter().map(|s| s.rejected_lines).sum()
    }
}
