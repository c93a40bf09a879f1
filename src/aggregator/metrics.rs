//! Traffic metrics over normalized event records.
//!
//! All three aggregations are pure sums or counts, so they do not depend
//! on the order of the input records. Sums saturate at `u64::MAX`.

use crate::parser::schema::{Direction, Entity, EventRecord};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bytes crossing the interconnect per cycle, ascending by cycle
pub type BandwidthByTime = BTreeMap<u64, u64>;

/// Per-PE byte totals keyed by roster index
pub type TrafficByEntity = BTreeMap<usize, TrafficTotals>;

/// Interconnect event counts keyed by message type label
pub type MessageTypeCounts = BTreeMap<String, u64>;

/// Byte totals for one PE
///
/// Per-entity logs fill `sent` and `received`; combined-log events have no
/// direction and land in `transferred`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficTotals {
    pub sent: u64,
    pub received: u64,
    pub transferred: u64,
}

impl TrafficTotals {
    /// All bytes attributed to the PE
    pub fn total(&self) -> u64 {
        self.sent
            .saturating_add(self.received)
            .saturating_add(self.transferred)
    }

    fn add(&mut self, direction: Direction, size: u64) {
        match direction {
            Direction::Sent => self.sent = self.sent.saturating_add(size),
            Direction::Received => self.received = self.received.saturating_add(size),
            Direction::Undirected => self.transferred = self.transferred.saturating_add(size),
        }
    }
}

/// The three aggregation results of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficMetrics {
    pub bandwidth_by_time: BandwidthByTime,
    pub traffic_by_entity: TrafficByEntity,
    pub message_types: MessageTypeCounts,
}

/// Sum interconnect bytes per cycle
///
/// **Public** - first of the three aggregations
///
/// Only cycles that appear in the data are present; events sharing a cycle
/// are summed.
pub fn bandwidth_by_time(events: &[EventRecord]) -> BandwidthByTime {
    let mut series = BandwidthByTime::new();

    for event in events.iter().filter(|e| e.crosses_interconnect()) {
        let bytes = series.entry(event.time).or_insert(0);
        *bytes = bytes.saturating_add(event.size);
    }

    debug!("Bandwidth series covers {} cycles", series.len());
    series
}

/// Sum bytes sent, received and transferred for every PE in the roster
///
/// **Public** - second of the three aggregations
///
/// The result always has exactly `pe_count` entries, idle PEs included.
/// Events attributed to an index outside the roster are ignored.
pub fn traffic_by_entity(events: &[EventRecord], pe_count: usize) -> TrafficByEntity {
    let mut traffic: TrafficByEntity = (0..pe_count)
        .map(|index| (index, TrafficTotals::default()))
        .collect();

    for event in events {
        if let Entity::Pe(index) = event.entity {
            if let Some(totals) = traffic.get_mut(&index) {
                totals.add(event.direction, event.size);
            }
        }
    }

    traffic
}

/// Count interconnect events per message type
///
/// **Public** - third of the three aggregations
pub fn message_type_distribution(events: &[EventRecord]) -> MessageTypeCounts {
    let mut counts = MessageTypeCounts::new();

    for event in events.iter().filter(|e| e.crosses_interconnect()) {
        let count = counts.entry(event.message_type.clone()).or_insert(0);
        *count = count.saturating_add(1);
    }

    debug!("Found {} distinct message types", counts.len());
    counts
}

/// Run all three aggregations over one event set
///
/// **Public** - main entry point for metrics calculation
pub fn calculate_metrics(events: &[EventRecord], pe_count: usize) -> TrafficMetrics {
    debug!("Aggregating {} events over {} PEs", events.len(), pe_count);

    TrafficMetrics {
        bandwidth_by_time: bandwidth_by_time(events),
        traffic_by_entity: traffic_by_entity(events, pe_count),
        message_types: message_type_distribution(events),
    }
}
