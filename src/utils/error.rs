//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Malformed trace lines are not errors: the record parser rejects them
//! and ingestion carries on. Only whole-file and whole-run failures live here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading trace files
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Missing mandatory trace file(s): {}", join_paths(.paths))]
    MissingTraces { paths: Vec<PathBuf> },

    #[error("No valid records in trace file: {}", .path.display())]
    NoValidRecords { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while detecting the schema of a trace file
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unrecognized trace schema in {}: header {header:?}", .path.display())]
    Unrecognized { path: PathBuf, header: String },

    #[error("Trace {} was expected to be {expected} but looks like {found}", .path.display())]
    HintMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Errors that can occur while loading or validating run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to read report {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Any failure that aborts an analysis run
#[derive(Error, Debug)]
pub enum TraceError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
