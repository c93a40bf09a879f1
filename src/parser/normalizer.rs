//! Schema detection and normalization into canonical event records.
//!
//! This is the only place that knows both on-disk shapes. Everything
//! downstream works on [`EventRecord`] regardless of where it came from.

use super::schema::{Direction, Entity, EventRecord, FixedFieldRecord, RawRecord, TabularRecord, TraceVariant};
use crate::utils::config::TABULAR_COLUMNS;
use crate::utils::error::SchemaError;
use log::warn;
use std::path::Path;

/// Detect the trace variant from a file's header line
///
/// **Public** - used by the loader and by `resolve_variant`
///
/// A comma-separated header must name exactly the tabular columns in order;
/// any other comma header is unrecognized. A header without commas is taken
/// as the free-form header of a fixed-field log.
pub fn detect_variant(header: &str) -> Option<TraceVariant> {
    let header = header.trim_start_matches('\u{feff}').trim();
    if header.is_empty() {
        return None;
    }

    if header.contains(',') {
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns == TABULAR_COLUMNS {
            return Some(TraceVariant::Tabular);
        }
        return None;
    }

    Some(TraceVariant::FixedField)
}

/// Pick the variant for a file, honouring an explicit caller hint
///
/// With a hint the header is only checked for a contradiction: a header
/// that positively detects as the other variant is rejected, anything else
/// (blank, unrecognized) is discarded as the hint's header line.
///
/// # Errors
/// * `SchemaError::Unrecognized` - no hint and header matches neither shape
/// * `SchemaError::HintMismatch` - header detects as the other variant
pub fn resolve_variant(
    path: &Path,
    header: &str,
    hint: Option<TraceVariant>,
) -> Result<TraceVariant, SchemaError> {
    match (hint, detect_variant(header)) {
        (Some(expected), Some(found)) if expected != found => Err(SchemaError::HintMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            found: found.to_string(),
        }),
        (Some(expected), _) => Ok(expected),
        (None, Some(found)) => Ok(found),
        (None, None) => Err(SchemaError::Unrecognized {
            path: path.to_path_buf(),
            header: header.trim().to_string(),
        }),
    }
}

/// Map a fixed-field line onto the entity whose file it came from
pub fn normalize_fixed(raw: FixedFieldRecord, entity: Entity) -> EventRecord {
    EventRecord {
        message_type: raw.message_type,
        direction: raw.direction,
        size: raw.size,
        endpoint: raw.endpoint,
        time: raw.time,
        entity,
    }
}

/// Map a combined-log row onto its PE
///
/// Rows naming a PE outside the configured roster are rejected.
pub fn normalize_tabular(raw: TabularRecord, pe_count: usize) -> Option<EventRecord> {
    if raw.pe_id >= pe_count {
        warn!(
            "Dropping combined-log row at time {}: PE {} is outside the roster of {}",
            raw.time, raw.pe_id, pe_count
        );
        return None;
    }

    Some(EventRecord {
        message_type: raw.message_type,
        direction: Direction::Undirected,
        size: raw.data_bytes,
        endpoint: String::new(),
        time: raw.time,
        entity: Entity::Pe(raw.pe_id),
    })
}

/// Normalize any raw record
///
/// `source` is the entity whose file produced a fixed-field record;
/// combined-log rows carry their own PE id instead.
pub fn normalize(raw: RawRecord, source: Entity, pe_count: usize) -> Option<EventRecord> {
    match raw {
        RawRecord::Fixed(record) => Some(normalize_fixed(record, source)),
        RawRecord::Tabular(record) => normalize_tabular(record, pe_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::record::{parse_fixed_line, parse_tabular_line};

    #[test]
    fn test_detect_tabular_header() {
        assert_eq!(
            detect_variant("time,peId,messageCount,dataBytes,messageType"),
            Some(TraceVariant::Tabular)
        );
        assert_eq!(
            detect_variant("\u{feff}time, peId, messageCount, dataBytes, messageType\r"),
            Some(TraceVariant::Tabular)
        );
    }

    #[test]
    fn test_detect_fixed_header() {
        assert_eq!(
            detect_variant("instr recvSend size srcDst cycle"),
            Some(TraceVariant::FixedField)
        );
    }

    #[test]
    fn test_detect_unrecognized() {
        assert_eq!(detect_variant("a,b,c"), None);
        assert_eq!(detect_variant("peId,time,messageCount,dataBytes,messageType"), None);
        assert_eq!(detect_variant("   "), None);
    }

    #[test]
    fn test_resolve_variant_hint_mismatch() {
        let err = resolve_variant(
            Path::new("pe0.txt"),
            "instr recvSend size srcDst cycle",
            Some(TraceVariant::Tabular),
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::HintMismatch { .. }));
    }

    #[test]
    fn test_resolve_variant_hint_overrides_unrecognized_header() {
        let path = Path::new("intconnect.txt");
        assert_eq!(
            resolve_variant(path, "instr,recvSend,size,srcDst,cycle", Some(TraceVariant::FixedField)).unwrap(),
            TraceVariant::FixedField
        );
        assert_eq!(
            resolve_variant(path, "", Some(TraceVariant::Tabular)).unwrap(),
            TraceVariant::Tabular
        );
        assert!(matches!(
            resolve_variant(path, "instr,recvSend,size,srcDst,cycle", None),
            Err(SchemaError::Unrecognized { .. })
        ));
    }

    #[test]
    fn test_normalize_fixed_keeps_entity() {
        let raw = parse_fixed_line("MSG_C 0 8 IC 2").unwrap();
        let event = normalize_fixed(raw, Entity::Pe(0));
        assert_eq!(event.entity, Entity::Pe(0));
        assert_eq!(event.direction, Direction::Received);
        assert!(!event.crosses_interconnect());
    }

    #[test]
    fn test_normalize_tabular_row() {
        let raw = parse_tabular_line("5,2,3,150,MSG_X").unwrap();
        let event = normalize_tabular(raw, 8).unwrap();
        assert_eq!(event.time, 5);
        assert_eq!(event.entity, Entity::Pe(2));
        assert_eq!(event.size, 150);
        assert_eq!(event.message_type, "MSG_X");
        assert_eq!(event.direction, Direction::Undirected);
        assert!(event.crosses_interconnect());
    }

    #[test]
    fn test_normalize_tabular_out_of_roster() {
        let raw = parse_tabular_line("5,8,1,150,MSG_X").unwrap();
        assert!(normalize_tabular(raw, 8).is_none());
    }
}
