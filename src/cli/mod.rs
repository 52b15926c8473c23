//! Command-line interface for ombscan
//!
//! `ombscan <base_directory> <line_offset>` plus optional flags. Argument
//! problems of any kind exit with status 1 and a usage hint; a completed
//! scan exits 0 whether or not anything matched.

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

pub mod output;
pub mod validate;

pub use output::Output;
pub use validate::{Invocation, UsageError};

use crate::config::OmbscanConfig;
use crate::reports::{JsonReporter, OutputFormat, ReportContext, Reporter, TextReporter};
use crate::scanner::{ScanResult, Scanner};
use crate::series::{SeriesKind, SeriesReport};

/// Scan OSU micro-benchmark result logs for runs below a magnitude threshold
#[derive(Parser, Debug)]
#[command(
    name = "ombscan",
    version,
    about = "Scan OSU micro-benchmark result logs for runs below a magnitude threshold",
    long_about = "Walks <BASE_DIRECTORY> recursively for *.out files, finds the first '# Size' \
                  header in each, reads the line <LINE_OFFSET> lines below it and reports files \
                  whose second column has an integer part shorter than four characters.",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Directory holding the benchmark logs (searched recursively)
    #[arg(value_name = "BASE_DIRECTORY")]
    pub base_directory: Option<String>,

    /// Lines below the '# Size' header to inspect (23 for bibw and latency)
    ///
    /// Dash-prefixed values that are not known flags land here so they get
    /// the offset error rather than clap's.
    #[arg(value_name = "LINE_OFFSET", allow_hyphen_values = true)]
    pub line_offset: Option<String>,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print the measurement series of matched files, grouped by module
    #[arg(long, value_enum, value_name = "KIND")]
    pub series: Option<SeriesKind>,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress per-file diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> ExitCode {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.execute(&output) {
            Ok(()) => ExitCode::SUCCESS,
            // The reader went away (`ombscan log 23 | head -1`); nothing left to say
            Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
            Err(err) => {
                match err.downcast_ref::<UsageError>() {
                    Some(usage) => output.fatal(&usage.to_string()),
                    None => output.fatal(&format!("Error: {:#}", err)),
                }
                ExitCode::from(1)
            }
        }
    }

    fn execute(&self, output: &Output) -> Result<()> {
        if self.print_config {
            let config = OmbscanConfig::load_with_custom_config(self.config.as_deref())?;
            output.line(config.to_toml()?.trim_end());
            return Ok(());
        }

        let invocation = validate::validate(self.base_directory.as_deref(), self.line_offset.as_deref())?;
        if !self.extra.is_empty() {
            tracing::debug!("Ignoring extra arguments: {:?}", self.extra);
        }

        let settings = OmbscanConfig::load_with_custom_config(self.config.as_deref())?.settings()?;
        output.verbose(&format!(
            "Looking for '{}' in {} files, field {}, fewer than {} integer digits",
            settings.scan.marker, settings.scan.file_glob, settings.scan.field, settings.scan.max_integer_digits
        ));
        let scanner = Scanner::new(&settings)?;

        let result = match self.format {
            OutputFormat::Text => {
                let mut reporter = TextReporter::new(io::stdout().lock(), &settings.scan.marker, output.is_quiet());
                run_report(&scanner, &invocation, self.series, &mut reporter)?
            }
            OutputFormat::Json => {
                let mut reporter = JsonReporter::new(io::stdout().lock());
                run_report(&scanner, &invocation, self.series, &mut reporter)?
            }
        };

        output.verbose(&format!(
            "{} of {} files matched in {} ms",
            result.stats.matches, result.stats.files_scanned, result.stats.scan_duration_ms
        ));
        Ok(())
    }
}

/// Scan, gather series if requested, and close the report
fn run_report(
    scanner: &Scanner,
    invocation: &Invocation,
    series: Option<SeriesKind>,
    reporter: &mut dyn Reporter,
) -> Result<ScanResult> {
    let root = Path::new(&invocation.base_directory);
    let result = scanner.scan(root, invocation.line_offset, reporter)?;

    let series = series.map(|kind| SeriesReport::collect(&result.matches, kind));
    let context = ReportContext {
        directory: &invocation.base_directory,
        offset: invocation.line_offset,
        result: &result,
        series: series.as_ref(),
    };
    reporter.finish(&context)?;
    Ok(result)
}

/// True when any cause in the chain is a closed stdout
pub(crate) fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        let kind = cause
            .downcast_ref::<io::Error>()
            .map(io::Error::kind)
            .or_else(|| cause.downcast_ref::<serde_json::Error>().and_then(|e| e.io_error_kind()));
        kind == Some(io::ErrorKind::BrokenPipe)
    })
}

/// Map a clap failure onto the exit-code contract: help and version exit 0,
/// anything else prints the error plus the usage hint and exits 1.
pub fn handle_parse_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            let _ = err.print();
            Output::new(false, false).fatal(&UsageError::MissingArguments.to_string());
            ExitCode::from(1)
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    // Logs share the terminal with the report, so they go to stderr
    let filter = if quiet {
        tracing_subscriber::EnvFilter::new("error")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        })
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
