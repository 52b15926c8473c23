//! Positional argument checks
//!
//! These run before anything touches the filesystem beyond the directory
//! test. Each failure carries the exact message printed before exiting 1.

use std::path::{MAIN_SEPARATOR, Path};
use thiserror::Error;

use crate::scanner::is_valid_offset;

/// Fatal invocation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Usage: ombscan <base_directory> <line_offset>\nExample: ombscan ./log 23 (for bibw and latency)")]
    MissingArguments,

    #[error("Error: Directory '{0}' does not exist.")]
    DirectoryNotFound(String),

    #[error("Error: Line offset '{0}' is not a valid number.")]
    InvalidOffset(String),
}

/// Validated positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub base_directory: String,
    pub line_offset: usize,
}

/// Check argument count, then the directory, then the offset
pub fn validate(base_directory: Option<&str>, line_offset: Option<&str>) -> Result<Invocation, UsageError> {
    let (Some(base_directory), Some(line_offset)) = (base_directory, line_offset) else {
        return Err(UsageError::MissingArguments);
    };

    let base_directory = strip_trailing_separator(base_directory);
    if !Path::new(base_directory).is_dir() {
        return Err(UsageError::DirectoryNotFound(base_directory.to_string()));
    }

    if !is_valid_offset(line_offset) {
        return Err(UsageError::InvalidOffset(line_offset.to_string()));
    }
    // Digits only, so the sole failure left is overflow
    let offset = line_offset
        .parse()
        .map_err(|_| UsageError::InvalidOffset(line_offset.to_string()))?;

    Ok(Invocation {
        base_directory: base_directory.to_string(),
        line_offset: offset,
    })
}

/// Drop one trailing separator; a bare root stays as is
pub fn strip_trailing_separator(dir: &str) -> &str {
    match dir.strip_suffix('/').or_else(|| dir.strip_suffix(MAIN_SEPARATOR)) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => dir,
    }
}
