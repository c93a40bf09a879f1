//! Summary statistics derived from the aggregation results.

use super::metrics::{BandwidthByTime, MessageTypeCounts, TrafficByEntity, TrafficTotals};
use serde::{Deserialize, Serialize};

/// Bandwidth statistics over the active cycles of a run
///
/// **Public** - returned from `BandwidthStats::from_series`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandwidthStats {
    /// Total bytes across all cycles
    pub total_bytes: u64,

    /// Number of cycles with at least one interconnect event
    pub active_cycles: usize,

    pub first_cycle: Option<u64>,
    pub last_cycle: Option<u64>,

    /// Earliest cycle with the highest byte count
    pub peak_cycle: Option<u64>,
    pub peak_bytes: u64,

    /// Mean bytes per active cycle
    pub mean_bytes_per_cycle: f64,
}

impl BandwidthStats {
    /// Compute statistics from a bandwidth series
    pub fn from_series(series: &BandwidthByTime) -> Self {
        if series.is_empty() {
            return Self::default();
        }

        let total_bytes = series.values().fold(0u64, |acc, &bytes| acc.saturating_add(bytes));
        let active_cycles = series.len();

        // strict comparison keeps the earliest cycle on ties
        let (peak_cycle, peak_bytes) = series.iter().fold((None, 0), |(cycle, best), (&t, &bytes)| {
            if cycle.is_none() || bytes > best {
                (Some(t), bytes)
            } else {
                (cycle, best)
            }
        });

        Self {
            total_bytes,
            active_cycles,
            first_cycle: series.keys().next().copied(),
            last_cycle: series.keys().next_back().copied(),
            peak_cycle,
            peak_bytes,
            mean_bytes_per_cycle: total_bytes as f64 / active_cycles as f64,
        }
    }

    /// Fraction of the observed cycle span that carried traffic (0.0 - 1.0)
    pub fn utilization(&self) -> f64 {
        match (self.first_cycle, self.last_cycle) {
            (Some(first), Some(last)) => self.active_cycles as f64 / (last - first).saturating_add(1) as f64,
            _ => 0.0,
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        match self.peak_cycle {
            Some(peak) => format!(
                "Total: {} bytes | Active cycles: {} | Peak: {} bytes @ cycle {} | Mean: {:.1} bytes/cycle",
                self.total_bytes, self.active_cycles, self.peak_bytes, peak, self.mean_bytes_per_cycle
            ),
            None => "No interconnect traffic".to_string(),
        }
    }
}

/// PE with the most total traffic; lowest index wins ties
pub fn busiest_pe(traffic: &TrafficByEntity) -> Option<(usize, TrafficTotals)> {
    traffic
        .iter()
        .filter(|(_, totals)| totals.total() > 0)
        .fold(None, |best: Option<(usize, TrafficTotals)>, (&index, &totals)| match best {
            Some((_, current)) if current.total() >= totals.total() => best,
            _ => Some((index, totals)),
        })
}

/// Sum of every PE's totals
pub fn roster_totals(traffic: &TrafficByEntity) -> TrafficTotals {
    traffic.values().fold(TrafficTotals::default(), |acc, t| TrafficTotals {
        sent: acc.sent.saturating_add(t.sent),
        received: acc.received.saturating_add(t.received),
        transferred: acc.transferred.saturating_add(t.transferred),
    })
}

/// Message types ordered by count (descending), then label
pub fn ranked_message_types(counts: &MessageTypeCounts) -> Vec<(&str, u64)> {
    let mut ranked: Vec<(&str, u64)> = counts.iter().map(|(label, &n)| (label.as_str(), n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_bandwidth_stats() {
        let series = BTreeMap::from([(0, 96), (1, 16), (4, 96)]);
        let stats = BandwidthStats::from_series(&series);

        assert_eq!(stats.total_bytes, 208);
        assert_eq!(stats.active_cycles, 3);
        assert_eq!(stats.peak_cycle, Some(0));
        assert_eq!(stats.peak_bytes, 96);
        assert_eq!(stats.last_cycle, Some(4));
        assert!((stats.utilization() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_bandwidth_stats_saturate() {
        let series = BTreeMap::from([(0, u64::MAX), (u64::MAX, u64::MAX)]);
        let stats = BandwidthStats::from_series(&series);

        assert_eq!(stats.total_bytes, u64::MAX);
        assert_eq!(stats.peak_cycle, Some(0));
        assert!(stats.utilization() > 0.0);

        let traffic = BTreeMap::from([
            (0, TrafficTotals { sent: u64::MAX, received: 0, transferred: 0 }),
            (1, TrafficTotals { sent: 1, received: 0, transferred: 0 }),
        ]);
        assert_eq!(roster_totals(&traffic).sent, u64::MAX);
    }

    #[test]
    fn test_bandwidth_stats_empty() {
        let stats = BandwidthStats::from_series(&BTreeMap::new());
        assert_eq!(stats.total_bytes, 0);
        assert_eq!(stats.peak_cycle, None);
        assert_eq!(stats.utilization(), 0.0);
        assert_eq!(stats.summary(), "No interconnect traffic");
    }

    #[test]
    fn test_busiest_pe_prefers_lowest_index() {
        let traffic = BTreeMap::from([
            (0, TrafficTotals { sent: 10, received: 0, transferred: 0 }),
            (1, TrafficTotals { sent: 0, received: 30, transferred: 0 }),
            (2, TrafficTotals { sent: 30, received: 0, transferred: 0 }),
        ]);

        assert_eq!(busiest_pe(&traffic).map(|(i, _)| i), Some(1));
        assert_eq!(roster_totals(&traffic).total(), 70);
    }

    #[test]
    fn test_busiest_pe_idle_roster() {
        let traffic = BTreeMap::from([(0, TrafficTotals::default())]);
        assert!(busiest_pe(&traffic).is_none());
    }

    #[test]
    fn test_ranked_message_types() {
        let counts = BTreeMap::from([
            ("WRITE_MEM".to_string(), 2),
            ("INV_ACK".to_string(), 5),
            ("READ_MEM".to_string(), 2),
        ]);

        let ranked = ranked_message_types(&counts);
        assert_eq!(ranked, vec![("INV_ACK", 5), ("READ_MEM", 2), ("WRITE_MEM", 2)]);
    }
}
