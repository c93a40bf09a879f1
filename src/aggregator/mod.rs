//! Aggregation of normalized events into traffic metrics.
//!
//! This module transforms loaded traces into:
//! - Bandwidth per cycle on the interconnect
//! - Sent/received traffic per PE
//! - Message type distribution
//! - Summary statistics over those results

pub mod metrics;
pub mod stats;

// Re-export main types and functions
pub use metrics::{
    bandwidth_by_time, calculate_metrics, message_type_distribution, traffic_by_entity,
    BandwidthByTime, MessageTypeCounts, TrafficByEntity, TrafficMetrics, TrafficTotals,
};
pub use stats::{busiest_pe, ranked_message_types, roster_totals, BandwidthStats};
