//! # ombscan - triage OSU micro-benchmark result logs
//!
//! Pairwise OMB runs (`osu_bibw`, `osu_latency`) leave one `*.out` log per
//! node pair. Each log carries a `# Size` header followed by the measurement
//! table. `ombscan` walks a log directory, reads the row a fixed number of
//! lines below that header and reports the runs whose reading is suspiciously
//! small (integer part shorter than four characters), which usually points
//! at a bad link or a misconfigured node.
//!
//! ## Quick Start
//!
//! ```bash
//! # Row 23 below the header is the 4 MiB message size for bibw and latency
//! ombscan ./log 23
//!
//! # Machine-readable output, with the full series of every flagged run
//! ombscan ./log 23 --format json --series bibw
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use ombscan::config::OmbscanConfig;
//! use ombscan::reports::TextReporter;
//! use ombscan::scanner::Scanner;
//! use std::path::Path;
//!
//! let settings = OmbscanConfig::load()?.settings()?;
//! let scanner = Scanner::new(&settings)?;
//! let mut reporter = TextReporter::new(std::io::stdout(), &settings.scan.marker, false);
//!
//! let result = scanner.scan(Path::new("log"), 23, &mut reporter)?;
//! for record in &result.matches {
//!     println!("{} -> {}", record.path.display(), record.value);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod reports;
pub mod scanner;
pub mod series;

pub use cli::Cli;
pub use config::OmbscanConfig;

/// Result type alias for ombscan operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
