//! Report output for scan results
//!
//! Reporters receive each per-file outcome as soon as it is known, then a
//! final [`ReportContext`] once the walk is over.

use anyhow::Result;

use crate::scanner::{FileOutcome, ScanResult};
use crate::series::SeriesReport;

mod json;
mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

/// Pluggable output format
pub trait Reporter {
    /// Called once per candidate file, in walk order
    fn on_outcome(&mut self, outcome: &FileOutcome) -> Result<()>;

    /// Called once after the walk
    fn finish(&mut self, context: &ReportContext<'_>) -> Result<()>;
}

/// Everything known once the walk is complete
pub struct ReportContext<'a> {
    /// Base directory as given, trailing separator stripped
    pub directory: &'a str,
    pub offset: usize,
    pub result: &'a ScanResult,
    pub series: Option<&'a SeriesReport>,
}

/// Output format selected on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented messages, one per event
    #[default]
    Text,
    /// A single JSON document after the scan
    Json,
}
