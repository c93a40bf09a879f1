//! Event record definitions shared by every trace variant.
//!
//! Raw records mirror the on-disk shapes one to one. The normalizer turns
//! them into [`EventRecord`], the only type the metrics engine sees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directionality of an event relative to the entity that logged it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Sent,
    Received,
    /// Combined-log events, which carry no direction
    Undirected,
}

impl Direction {
    /// Decode the fixed-field direction flag (`1` sent, `0` received)
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "1" => Some(Self::Sent),
            "0" => Some(Self::Received),
            _ => None,
        }
    }

    /// Encode back to the fixed-field flag; `None` for undirected events
    pub fn flag(self) -> Option<u8> {
        match self {
            Self::Sent => Some(1),
            Self::Received => Some(0),
            Self::Undirected => None,
        }
    }
}

/// The trace source an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Interconnect,
    /// Processing element by roster index
    Pe(usize),
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Interconnect => write!(f, "interconnect"),
            Entity::Pe(index) => write!(f, "PE{}", index),
        }
    }
}

/// Supported on-disk trace shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceVariant {
    /// Whitespace-separated per-entity log, one file per entity
    FixedField,
    /// Comma-separated combined log for the whole system
    Tabular,
}

impl fmt::Display for TraceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceVariant::FixedField => write!(f, "fixed-field"),
            TraceVariant::Tabular => write!(f, "tabular"),
        }
    }
}

/// Canonical event record consumed by the metrics engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Operation label (open vocabulary, never empty)
    pub message_type: String,

    pub direction: Direction,

    /// Bytes transferred
    pub size: u64,

    /// Communication counterpart, opaque; empty for combined-log events
    pub endpoint: String,

    /// Simulated cycle
    pub time: u64,

    pub entity: Entity,
}

impl EventRecord {
    /// Whether this event belongs to the interconnect-level series.
    ///
    /// Interconnect trace events qualify, and so does every combined-log
    /// event since that log is written from the interconnect's point of view.
    pub fn crosses_interconnect(&self) -> bool {
        self.entity == Entity::Interconnect || self.direction == Direction::Undirected
    }
}

/// One line of a fixed-field log: `<type> <0|1> <size> <endpoint> <time>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFieldRecord {
    pub message_type: String,
    pub direction: Direction,
    pub size: u64,
    pub endpoint: String,
    pub time: u64,
}

impl FixedFieldRecord {
    /// Serialize back to the single-space fixed-field line format
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.message_type,
            self.direction.flag().unwrap_or(0),
            self.size,
            self.endpoint,
            self.time
        )
    }
}

/// One row of the combined log: `time,peId,messageCount,dataBytes,messageType`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularRecord {
    pub time: u64,
    pub pe_id: usize,
    /// Carried for completeness, not aggregated
    pub message_count: u64,
    pub data_bytes: u64,
    pub message_type: String,
}

/// A parsed line before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    Fixed(FixedFieldRecord),
    Tabular(TabularRecord),
}

/// Message kinds the interconnect simulator emits
///
/// Labels outside this set are still valid message types; they classify as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    ReadMem,
    WriteMem,
    BroadcastInvalidate,
    InvAck,
    InvComplete,
    ReadResp,
    WriteResp,
    Other,
}

impl MessageKind {
    /// Classify a message type label (case-insensitive)
    pub fn classify(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "READ_MEM" => Self::ReadMem,
            "WRITE_MEM" => Self::WriteMem,
            "BROADCAST_INVALIDATE" => Self::BroadcastInvalidate,
            "INV_ACK" => Self::InvAck,
            "INV_COMPLETE" => Self::InvComplete,
            "READ_RESP" => Self::ReadResp,
            "WRITE_RESP" => Self::WriteResp,
            _ => Self::Other,
        }
    }

    /// Short human-readable description for summaries
    pub fn description(self) -> &'static str {
        match self {
            Self::ReadMem => "memory read request",
            Self::WriteMem => "memory write request",
            Self::BroadcastInvalidate => "cache invalidation broadcast",
            Self::InvAck => "invalidation acknowledgement",
            Self::InvComplete => "invalidation complete",
            Self::ReadResp => "memory read response",
            Self::WriteResp => "memory write response",
            Self::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flags() {
        assert_eq!(Direction::from_flag("1"), Some(Direction::Sent));
        assert_eq!(Direction::from_flag("0"), Some(Direction::Received));
        assert_eq!(Direction::from_flag("2"), None);
        assert_eq!(Direction::Undirected.flag(), None);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::Interconnect.to_string(), "interconnect");
        assert_eq!(Entity::Pe(5).to_string(), "PE5");
    }

    #[test]
    fn test_classify_message_kind() {
        assert_eq!(MessageKind::classify("READ_MEM"), MessageKind::ReadMem);
        assert_eq!(MessageKind::classify("inv_ack"), MessageKind::InvAck);
        assert_eq!(MessageKind::classify("MSG_A"), MessageKind::Other);
    }
}
