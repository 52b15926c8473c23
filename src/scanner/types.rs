use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::ScanSettings;

/// A file whose target-line field passed the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub path: PathBuf,
    pub line: usize,
    pub value: String,
}

/// Per-file result of a scan, reported as soon as the file is processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Matched(MatchRecord),
    MissingMarker { path: PathBuf },
    MissingTargetLine { path: PathBuf, line: usize },
    /// Field absent, not numeric, or too long; never printed in text mode
    Rejected {
        path: PathBuf,
        line: usize,
        value: Option<String>,
    },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Matched(record) => &record.path,
            FileOutcome::MissingMarker { path }
            | FileOutcome::MissingTargetLine { path, .. }
            | FileOutcome::Rejected { path, .. } => path,
        }
    }
}

/// Statistics from a scanning operation
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub matches: usize,
    pub missing_marker: usize,
    pub missing_line: usize,
    pub rejected: usize,
    pub scan_duration_ms: u64,
}

impl ScanStats {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_scanned += 1;
        match outcome {
            FileOutcome::Matched(_) => self.matches += 1,
            FileOutcome::MissingMarker { .. } => self.missing_marker += 1,
            FileOutcome::MissingTargetLine { .. } => self.missing_line += 1,
            FileOutcome::Rejected { .. } => self.rejected += 1,
        }
    }
}

/// Result of a scanning operation
#[derive(Debug, Default)]
pub struct ScanResult {
    pub matches: Vec<MatchRecord>,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Configuration for the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub marker: String,
    pub file_glob: String,
    pub field: usize,
    pub max_integer_digits: usize,
    pub follow_symlinks: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from(&ScanSettings::default())
    }
}

impl From<&ScanSettings> for ScannerConfig {
    fn from(settings: &ScanSettings) -> Self {
        Self {
            marker: settings.marker.clone(),
            file_glob: settings.file_glob.clone(),
            field: settings.field,
            max_integer_digits: settings.max_integer_digits,
            follow_symlinks: settings.follow_symlinks,
        }
    }
}
