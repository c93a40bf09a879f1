//! IC Trace Metrics
//!
//! Traffic metrics for multi-core interconnect simulator traces:
//! bandwidth per cycle, bytes sent/received per PE and the
//! distribution of message types crossing the interconnect.
//!
//! This crate provides the core implementation for the
//! `ic-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```ignore
//! use ic_trace_metrics::commands::run_analysis;
//! use ic_trace_metrics::utils::config::AnalysisConfig;
//!
//! let report = run_analysis(&AnalysisConfig::for_dir("output"))?;
//! println!("{:?}", report.bandwidth_by_time);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
