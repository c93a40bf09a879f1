//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Parsing single trace lines (fixed-field and tabular)
//! - Detecting which schema a trace file follows
//! - Normalizing both shapes into one event record
//! - Loading whole files and whole runs

pub mod loader;
pub mod normalizer;
pub mod record;
pub mod schema;

// Re-export main types
pub use loader::{load_optional_trace, load_run, load_trace, SourceSummary, TraceLog, TraceSet};
pub use normalizer::{detect_variant, normalize, resolve_variant};
pub use record::{parse_fixed_line, parse_line, parse_tabular_line};
pub use schema::{
    Direction, Entity, EventRecord, FixedFieldRecord, MessageKind, RawRecord, TabularRecord,
    TraceVariant,
};
