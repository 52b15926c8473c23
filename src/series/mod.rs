//! Measurement series of matched benchmark logs
//!
//! Reads the full `size value` table of each matched file and groups the
//! files by the OMB module encoded in their names, so a flagged run can be
//! compared against its peers built from the same MPI stack.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::scanner::MatchRecord;

pub mod names;
pub mod table;

pub use names::{JobLogName, module_name};
pub use table::{Measurement, parse_rows};

/// Which OMB benchmark produced the logs
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// osu_bibw: bi-directional bandwidth
    Bibw,
    /// osu_latency: point-to-point latency
    Latency,
}

impl SeriesKind {
    pub fn value_label(self) -> &'static str {
        match self {
            SeriesKind::Bibw => "Bandwidth (MB/s)",
            SeriesKind::Latency => "Latency (us)",
        }
    }

    pub fn size_label(self) -> &'static str {
        "Size (Bytes)"
    }
}

/// Measurements read from one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSeries {
    pub path: PathBuf,
    pub rows: Vec<Measurement>,
}

/// Matched files grouped by module, modules in name order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport {
    pub kind: SeriesKind,
    pub modules: BTreeMap<String, Vec<FileSeries>>,
}

impl SeriesReport {
    /// Read the series of every matched file that carries a module name.
    /// Files without one, or that can no longer be read, are left out.
    pub fn collect(matches: &[MatchRecord], kind: SeriesKind) -> Self {
        let mut modules: BTreeMap<String, Vec<FileSeries>> = BTreeMap::new();

        for record in matches {
            let Some(module) = record
                .path
                .file_name()
                .and_then(|name| module_name(&name.to_string_lossy()))
            else {
                tracing::debug!("No module name in {}, skipping series", record.path.display());
                continue;
            };

            let contents = match std::fs::read(&record.path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    tracing::warn!("Failed to re-read {}: {}", record.path.display(), e);
                    continue;
                }
            };

            modules.entry(module).or_default().push(FileSeries {
                path: record.path.clone(),
                rows: parse_rows(&contents),
            });
        }

        Self { kind, modules }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
