use crate::utils::config::{AnalysisConfig, SchemaHint};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Resolved run configuration
    pub config: AnalysisConfig,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Maximum rows per table in the text summary
    pub summary_rows: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            output_json: Some(PathBuf::from("report.json")),
            print_summary: false,
            summary_rows: 20,
        }
    }
}

/// CLI flags that override values from a config file
///
/// `None` keeps whatever the file (or the default) says.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub trace_dir: Option<PathBuf>,
    pub pe_count: Option<usize>,
    pub interconnect_file: Option<String>,
    pub pe_file_template: Option<String>,
    pub combined_file: Option<String>,
    pub schema_hint: Option<SchemaHint>,
}

impl ConfigOverrides {
    /// Layer these overrides on top of `config`
    pub fn apply(self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(dir) = self.trace_dir {
            config.trace_dir = dir;
        }
        if let Some(pe_count) = self.pe_count {
            config.pe_count = pe_count;
        }
        if let Some(file) = self.interconnect_file {
            config.interconnect_file = file;
        }
        if let Some(template) = self.pe_file_template {
            config.pe_file_template = template;
        }
        if self.combined_file.is_some() {
            config.combined_file = self.combined_file;
        }
        if let Some(hint) = self.schema_hint {
            config.schema_hint = hint;
        }
        config
    }
}
