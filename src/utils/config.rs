//! Configuration and constants for trace analysis.

use crate::parser::schema::TraceVariant;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Number of processing elements the simulator runs by default
pub const DEFAULT_PE_COUNT: usize = 8;

/// Upper bound on the PE roster; the simulator addresses PEs with one byte
pub const MAX_PE_COUNT: usize = 256;

// File names the simulator writes into its output directory
pub const DEFAULT_TRACE_DIR: &str = "output";
pub const DEFAULT_INTERCONNECT_FILE: &str = "intconnect.txt";
pub const DEFAULT_PE_FILE_TEMPLATE: &str = "pe{}.txt";

/// Placeholder replaced by the PE index in `pe_file_template`
pub const PE_INDEX_PLACEHOLDER: &str = "{}";

/// Header columns of the combined tabular log, in order
pub const TABULAR_COLUMNS: &[&str] = &["time", "peId", "messageCount", "dataBytes", "messageType"];

/// Number of whitespace tokens in a fixed-field event line
pub const FIXED_FIELD_COUNT: usize = 5;

/// How the schema of each trace file is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SchemaHint {
    /// Detect from the header line
    #[default]
    Auto,
    /// Whitespace-separated per-entity log
    Fixed,
    /// Comma-separated combined log
    Tabular,
}

impl SchemaHint {
    /// The variant forced by this hint, if any
    pub fn variant(self) -> Option<TraceVariant> {
        match self {
            SchemaHint::Auto => None,
            SchemaHint::Fixed => Some(TraceVariant::FixedField),
            SchemaHint::Tabular => Some(TraceVariant::Tabular),
        }
    }
}

/// Settings for one analysis run
///
/// Loaded from TOML (all keys optional) and then overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the trace files
    pub trace_dir: PathBuf,

    /// Size of the PE roster; traffic is always reported for exactly this many PEs
    pub pe_count: usize,

    /// Interconnect trace file name, relative to `trace_dir`
    pub interconnect_file: String,

    /// PE trace file name template, `{}` is replaced by the PE index
    pub pe_file_template: String,

    /// Combined tabular log, relative to `trace_dir`; replaces the per-entity files when set
    pub combined_file: Option<String>,

    /// Schema selection for every file in the run
    pub schema_hint: SchemaHint,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trace_dir: PathBuf::from(DEFAULT_TRACE_DIR),
            pe_count: DEFAULT_PE_COUNT,
            interconnect_file: DEFAULT_INTERCONNECT_FILE.to_string(),
            pe_file_template: DEFAULT_PE_FILE_TEMPLATE.to_string(),
            combined_file: None,
            schema_hint: SchemaHint::Auto,
        }
    }
}

impl AnalysisConfig {
    /// Config for a directory with default file names
    pub fn for_dir(trace_dir: impl Into<PathBuf>) -> Self {
        Self {
            trace_dir: trace_dir.into(),
            ..Default::default()
        }
    }

    /// Builder-style PE count override
    pub fn with_pe_count(mut self, pe_count: usize) -> Self {
        self.pe_count = pe_count;
        self
    }

    /// Builder-style switch to the combined tabular layout
    pub fn with_combined_file(mut self, file: impl Into<String>) -> Self {
        self.combined_file = Some(file.into());
        self
    }

    /// Full path of the interconnect trace
    pub fn interconnect_path(&self) -> PathBuf {
        self.trace_dir.join(&self.interconnect_file)
    }

    /// Full path of the trace for PE `index`
    pub fn pe_path(&self, index: usize) -> PathBuf {
        let name = self
            .pe_file_template
            .replace(PE_INDEX_PLACEHOLDER, &index.to_string());
        self.trace_dir.join(name)
    }

    /// Full path of the combined log, if the run uses one
    pub fn combined_path(&self) -> Option<PathBuf> {
        self.combined_file.as_ref().map(|f| self.trace_dir.join(f))
    }

    /// Check the config before any file is opened
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pe_count == 0 {
            return Err(ConfigError::Invalid("pe_count must be greater than 0".to_string()));
        }

        if self.pe_count > MAX_PE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "pe_count is too large (max {})",
                MAX_PE_COUNT
            )));
        }

        match &self.combined_file {
            Some(file) if file.trim().is_empty() => {
                return Err(ConfigError::Invalid("combined_file cannot be empty".to_string()));
            }
            Some(_) => {
                if self.schema_hint == SchemaHint::Fixed {
                    return Err(ConfigError::Invalid(
                        "combined_file requires the tabular schema".to_string(),
                    ));
                }
            }
            None => {
                if self.schema_hint == SchemaHint::Tabular {
                    return Err(ConfigError::Invalid(
                        "the tabular schema requires combined_file".to_string(),
                    ));
                }
                if self.interconnect_file.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "interconnect_file cannot be empty".to_string(),
                    ));
                }
                if !self.pe_file_template.contains(PE_INDEX_PLACEHOLDER) {
                    return Err(ConfigError::Invalid(format!(
                        "pe_file_template must contain '{}'",
                        PE_INDEX_PLACEHOLDER
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Load run configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
///
/// # Example
/// ```ignore
/// let config = load_config("run.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    Ok(config)
}
