//! Console output for ombscan
//!
//! Report lines go through the reporters; this handler covers everything
//! else the CLI prints: fatal errors, the usage hint and config dumps.

use console::style;
use std::io::{self, Write};

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a line exactly as given
    pub fn line(&self, message: &str) {
        let _ = writeln!(io::stdout(), "{}", message);
    }

    /// Print a fatal message. Always shown, even in quiet mode, and kept
    /// unstyled on stdout so scripts can match it. A closed stdout is
    /// ignored rather than panicking.
    pub fn fatal(&self, message: &str) {
        let _ = writeln!(io::stdout(), "{}", message);
    }

    /// Print a verbose message to stderr (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Get quiet mode status
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
