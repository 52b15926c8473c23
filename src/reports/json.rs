//! JSON reporter - machine-friendly format

use anyhow::Result;
use serde_json::{Value, json};
use std::io::Write;

use super::{ReportContext, Reporter};
use crate::scanner::FileOutcome;
use crate::series::JobLogName;

/// Buffers diagnostics and writes one JSON document when the scan finishes
pub struct JsonReporter<W: Write> {
    out: W,
    diagnostics: Vec<Value>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            diagnostics: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn job_of(path: &std::path::Path) -> Value {
    path.file_name()
        .and_then(|name| JobLogName::parse(&name.to_string_lossy()))
        .map_or(Value::Null, |job| json!(job))
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn on_outcome(&mut self, outcome: &FileOutcome) -> Result<()> {
        match outcome {
            FileOutcome::MissingMarker { path } => self.diagnostics.push(json!({
                "path": path.display().to_string(),
                "kind": "missing_marker",
            })),
            FileOutcome::MissingTargetLine { path, line } => self.diagnostics.push(json!({
                "path": path.display().to_string(),
                "kind": "missing_line",
                "line": line,
            })),
            FileOutcome::Matched(_) | FileOutcome::Rejected { .. } => {}
        }
        Ok(())
    }

    fn finish(&mut self, context: &ReportContext<'_>) -> Result<()> {
        let matches: Vec<Value> = context
            .result
            .matches
            .iter()
            .map(|record| {
                json!({
                    "path": record.path.display().to_string(),
                    "line": record.line,
                    "value": record.value,
                    "job": job_of(&record.path),
                })
            })
            .collect();

        let mut report = json!({
            "directory": context.directory,
            "offset": context.offset,
            "matches": matches,
            "diagnostics": self.diagnostics,
            "summary": context.result.stats,
        });
        if let Some(series) = context.series {
            report["series"] = serde_json::to_value(series)?;
        }

        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
