//! Line-level record parser.
//!
//! Each function has two outcomes: a record, or `None` for a line that does
//! not fit its shape. Header lines, blank lines and damaged lines are all
//! expected input, so rejection is silent here and only counted by the loader.

use super::schema::{Direction, FixedFieldRecord, RawRecord, TabularRecord, TraceVariant};
use crate::utils::config::{FIXED_FIELD_COUNT, TABULAR_COLUMNS};
use csv::StringRecord;

/// Parse one whitespace-separated event line
///
/// **Public** - used by the trace loader for per-entity logs
///
/// Accepts exactly five tokens `<type> <0|1> <size> <endpoint> <time>`.
/// Any other token count, an unknown direction flag or a non-integer
/// size/time rejects the line.
pub fn parse_fixed_line(line: &str) -> Option<FixedFieldRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIXED_FIELD_COUNT {
        return None;
    }

    let direction = Direction::from_flag(tokens[1])?;
    let size = tokens[2].parse::<u64>().ok()?;
    let time = tokens[4].parse::<u64>().ok()?;

    Some(FixedFieldRecord {
        message_type: tokens[0].to_string(),
        direction,
        size,
        endpoint: tokens[3].to_string(),
        time,
    })
}

/// Parse one combined-log row that has already been split into fields
///
/// **Public** - used by the trace loader on `csv` records
///
/// Fields are matched by position against `TABULAR_COLUMNS`. A row with a
/// different field count, a non-integer numeric field or an empty message
/// type is rejected.
pub fn parse_tabular_record(record: &StringRecord) -> Option<TabularRecord> {
    if record.len() != TABULAR_COLUMNS.len() {
        return None;
    }

    let row: TabularRecord = record.deserialize(None).ok()?;
    if row.message_type.is_empty() {
        return None;
    }

    Some(row)
}

/// Parse one raw combined-log line (unquoted, comma-separated)
pub fn parse_tabular_line(line: &str) -> Option<TabularRecord> {
    let record: StringRecord = line.split(',').map(str::trim).collect();
    parse_tabular_record(&record)
}

/// Parse one raw line of the given variant
///
/// **Public** - convenience entry point for single lines
pub fn parse_line(line: &str, variant: TraceVariant) -> Option<RawRecord> {
    match variant {
        TraceVariant::FixedField => parse_fixed_line(line).map(RawRecord::Fixed),
        TraceVariant::Tabular => parse_tabular_line(line).map(RawRecord::Tabular),
    }
}
