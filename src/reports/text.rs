use anyhow::Result;
use console::style;
use std::io::Write;

use super::{ReportContext, Reporter};
use crate::scanner::FileOutcome;
use crate::series::SeriesReport;

/// Line-oriented reporter
///
/// Scan lines are written unstyled so they can be grepped and diffed
/// verbatim. `quiet` drops the per-file diagnostics but never matches or
/// the closing summary.
pub struct TextReporter<W: Write> {
    out: W,
    marker: String,
    quiet: bool,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W, marker: impl Into<String>, quiet: bool) -> Self {
        Self {
            out,
            marker: marker.into(),
            quiet,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_series(&mut self, series: &SeriesReport) -> Result<()> {
        if series.is_empty() {
            return Ok(());
        }

        let size_label = series.kind.size_label();
        let value_label = series.kind.value_label();

        for (module, files) in &series.modules {
            writeln!(self.out)?;
            writeln!(self.out, "{}", style(format!("Module {}", module)).bold().cyan())?;
            for file in files {
                writeln!(self.out, "  {}", file.path.display())?;
                writeln!(self.out, "    {:<14} {}", size_label, value_label)?;
                for row in &file.rows {
                    writeln!(self.out, "    {:<14} {}", row.size, row.value)?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn on_outcome(&mut self, outcome: &FileOutcome) -> Result<()> {
        match outcome {
            FileOutcome::Matched(record) => writeln!(
                self.out,
                "Matched file: {}, Line: {}, Second column: {}",
                record.path.display(),
                record.line,
                record.value
            )?,
            FileOutcome::MissingMarker { path } if !self.quiet => writeln!(
                self.out,
                "File '{}' does not contain '{}'.",
                path.display(),
                self.marker
            )?,
            FileOutcome::MissingTargetLine { path, line } if !self.quiet => writeln!(
                self.out,
                "File '{}' does not have a valid line at {}.",
                path.display(),
                line
            )?,
            _ => {}
        }
        Ok(())
    }

    fn finish(&mut self, context: &ReportContext<'_>) -> Result<()> {
        if !context.result.has_matches() {
            writeln!(
                self.out,
                "No files matched the criteria in directory '{}'.",
                context.directory
            )?;
        }
        if let Some(series) = context.series {
            self.write_series(series)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
