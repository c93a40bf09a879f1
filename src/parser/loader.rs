//! Trace file loading.
//!
//! Reads whole trace files, detects their schema from the header line and
//! runs every remaining line through the record parser and normalizer.
//! A run is either per-entity (one interconnect file plus one file per PE)
//! or combined (a single tabular log).

use super::normalizer::{normalize_fixed, normalize_tabular, resolve_variant};
use super::record::{parse_fixed_line, parse_tabular_record};
use super::schema::{Entity, EventRecord, TraceVariant};
use crate::utils::config::AnalysisConfig;
use crate::utils::error::{IngestError, TraceError};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Records loaded from one trace file
#[derive(Debug, Clone)]
pub struct TraceLog {
    pub path: PathBuf,

    /// Entity the file represents; the combined log stands for the interconnect
    pub source: Entity,

    /// `None` when the file had no header to detect from
    pub variant: Option<TraceVariant>,

    /// Accepted records in file order
    pub records: Vec<EventRecord>,

    /// Non-blank data lines that were dropped
    pub rejected_lines: usize,
}

impl TraceLog {
    fn empty(path: &Path, source: Entity, variant: Option<TraceVariant>) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
            variant,
            records: Vec::new(),
            rejected_lines: 0,
        }
    }

    /// Ingestion accounting for reports
    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            entity: self.source,
            path: self.path.clone(),
            variant: self.variant,
            present: true,
            records: self.records.len(),
            rejected_lines: self.rejected_lines,
        }
    }
}

/// Per-file ingestion accounting carried into the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub entity: Entity,
    pub path: PathBuf,
    pub variant: Option<TraceVariant>,

    /// False for an optional PE file that did not exist
    pub present: bool,

    pub records: usize,
    pub rejected_lines: usize,
}

/// Everything loaded for one analysis run
#[derive(Debug, Clone)]
pub struct TraceSet {
    /// Size of the PE roster the run was loaded with
    pub pe_count: usize,

    /// Loaded files, interconnect (or combined log) first
    pub logs: Vec<TraceLog>,

    /// Optional PE files that were absent
    pub missing: Vec<(Entity, PathBuf)>,
}

impl TraceSet {
    /// Accounting for every configured source, present or not
    pub fn source_summaries(&self) -> Vec<SourceSummary> {
        let mut summaries: Vec<SourceSummary> = self.logs.iter().map(TraceLog::summary).collect();
        summaries.extend(self.missing.iter().map(|(entity, path)| SourceSummary {
            entity: *entity,
            path: path.clone(),
            variant: None,
            present: false,
            records: 0,
            rejected_lines: 0,
        }));
        summaries.sort_by_key(|s| s.entity);
        summaries
    }

    /// Total accepted records across all files
    pub fn record_count(&self) -> usize {
        self.logs.iter().map(|log| log.records.len()).sum()
    }

    /// Flatten into one normalized event sequence
    pub fn into_events(self) -> Vec<EventRecord> {
        self.logs.into_iter().flat_map(|log| log.records).collect()
    }
}

/// Load one trace file
///
/// **Public** - main entry point for a single file
///
/// # Arguments
/// * `path` - Trace file to read
/// * `source` - Entity the file represents
/// * `hint` - Forced variant, or `None` to detect from the header
/// * `pe_count` - Roster size, used to validate combined-log PE ids
///
/// # Errors
/// * `IngestError::MissingTraces` - File does not exist
/// * `IngestError::Io` - File could not be read
/// * `IngestError::NoValidRecords` - File has data lines but none parsed
/// * `SchemaError` - Header matches neither variant or contradicts `hint`
pub fn load_trace(
    path: impl AsRef<Path>,
    source: Entity,
    hint: Option<TraceVariant>,
    pe_count: usize,
) -> Result<TraceLog, TraceError> {
    let path = path.as_ref();
    let contents = read_trace(path)?;

    let Some(header) = contents.lines().next() else {
        debug!("{} is empty", path.display());
        return Ok(TraceLog::empty(path, source, hint));
    };

    if header.trim().is_empty() && contents.trim().is_empty() {
        debug!("{} contains only whitespace", path.display());
        return Ok(TraceLog::empty(path, source, hint));
    }

    let variant = resolve_variant(path, header, hint)?;
    debug!("Loading {} as {} trace for {}", path.display(), variant, source);

    let (records, data_lines) = match variant {
        TraceVariant::FixedField => load_fixed(path, &contents, source),
        TraceVariant::Tabular => load_tabular(path, &contents, pe_count),
    };

    if data_lines > 0 && records.is_empty() {
        return Err(IngestError::NoValidRecords {
            path: path.to_path_buf(),
        }
        .into());
    }

    let rejected_lines = data_lines - records.len();
    debug!(
        "Loaded {} records from {} ({} lines rejected)",
        records.len(),
        path.display(),
        rejected_lines
    );

    Ok(TraceLog {
        path: path.to_path_buf(),
        source,
        variant: Some(variant),
        records,
        rejected_lines,
    })
}

/// Load a trace that may legitimately be absent
///
/// Returns `Ok(None)` when the file does not exist; every other failure
/// is still an error.
pub fn load_optional_trace(
    path: impl AsRef<Path>,
    source: Entity,
    hint: Option<TraceVariant>,
    pe_count: usize,
) -> Result<Option<TraceLog>, TraceError> {
    match load_trace(path.as_ref(), source, hint, pe_count) {
        Ok(log) => Ok(Some(log)),
        Err(TraceError::Ingest(IngestError::MissingTraces { .. })) => {
            info!("No trace for {} at {}, treating as idle", source, path.as_ref().display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load every trace a run is configured with
///
/// **Public** - entry point for the analyze pipeline
///
/// Per-entity runs load PE files in parallel. The interconnect trace is
/// mandatory, PE files are optional individually but not all at once.
/// PE files are always read as fixed-field logs; a tabular PE file is a
/// `SchemaError::HintMismatch`.
///
/// # Errors
/// * `ConfigError::Invalid` - Config fails validation
/// * `IngestError::MissingTraces` - Interconnect or combined log absent, or
///   every PE file absent; names each missing path
/// * Any error from `load_trace`
pub fn load_run(config: &AnalysisConfig) -> Result<TraceSet, TraceError> {
    config.validate()?;
    let hint = config.schema_hint.variant();

    if let Some(combined) = config.combined_path() {
        info!("Loading combined trace: {}", combined.display());
        let log = load_trace(
            &combined,
            Entity::Interconnect,
            Some(TraceVariant::Tabular),
            config.pe_count,
        )?;
        return Ok(TraceSet {
            pe_count: config.pe_count,
            logs: vec![log],
            missing: Vec::new(),
        });
    }

    let interconnect_path = config.interconnect_path();
    info!("Loading interconnect trace: {}", interconnect_path.display());
    let interconnect =
        load_optional_trace(&interconnect_path, Entity::Interconnect, hint, config.pe_count)?;

    // PE files only exist in the fixed-field layout
    info!("Loading {} PE traces from {}", config.pe_count, config.trace_dir.display());
    let pes: Vec<(usize, Option<TraceLog>)> = (0..config.pe_count)
        .into_par_iter()
        .map(|index| {
            load_optional_trace(
                config.pe_path(index),
                Entity::Pe(index),
                Some(TraceVariant::FixedField),
                config.pe_count,
            )
            .map(|log| (index, log))
        })
        .collect::<Result<_, _>>()?;

    let mut missing_paths = Vec::new();
    if interconnect.is_none() {
        missing_paths.push(interconnect_path);
    }
    if pes.iter().all(|(_, log)| log.is_none()) {
        missing_paths.extend((0..config.pe_count).map(|index| config.pe_path(index)));
    }
    if !missing_paths.is_empty() {
        return Err(IngestError::MissingTraces {
            paths: missing_paths,
        }
        .into());
    }

    let mut logs = Vec::with_capacity(config.pe_count + 1);
    logs.extend(interconnect);
    let mut missing = Vec::new();
    for (index, log) in pes {
        match log {
            Some(log) => logs.push(log),
            None => missing.push((Entity::Pe(index), config.pe_path(index))),
        }
    }

    Ok(TraceSet {
        pe_count: config.pe_count,
        logs,
        missing,
    })
}

/// Read a whole trace file, mapping a missing file to `MissingTraces`
///
/// **Private** - internal helper for load_trace
fn read_trace(path: &Path) -> Result<String, IngestError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => IngestError::MissingTraces {
            paths: vec![path.to_path_buf()],
        },
        _ => IngestError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Parse the body of a fixed-field log; returns records and data line count
///
/// **Private** - internal helper for load_trace
fn load_fixed(path: &Path, contents: &str, source: Entity) -> (Vec<EventRecord>, usize) {
    let mut records = Vec::new();
    let mut data_lines = 0;

    for (index, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        data_lines += 1;

        match parse_fixed_line(line) {
            Some(raw) => records.push(normalize_fixed(raw, source)),
            None => debug!("{}:{}: rejected line {:?}", path.display(), index + 1, line),
        }
    }

    (records, data_lines)
}

/// Parse the body of a combined log; returns records and data row count
///
/// **Private** - internal helper for load_trace
fn load_tabular(path: &Path, contents: &str, pe_count: usize) -> (Vec<EventRecord>, usize) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    let mut data_lines = 0;

    for result in reader.records() {
        data_lines += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                debug!("{}: rejected row: {}", path.display(), e);
                continue;
            }
        };

        match parse_tabular_record(&row).and_then(|raw| normalize_tabular(raw, pe_count)) {
            Some(event) => records.push(event),
            None => debug!(
                "{}:{}: rejected row {:?}",
                path.display(),
                row.position().map(|p| p.line()).unwrap_or(0),
                row
            ),
        }
    }

    (records, data_lines)
}
