//! Configuration management for ombscan
//!
//! Settings are layered with figment: embedded defaults, the user config,
//! the repository config (or an explicit `--config` file), then `OMBSCAN_`
//! environment variables. The defaults reproduce the classic
//! `# Size` / `*.out` / second-column / under-4-digits behavior exactly.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

mod core;
mod smart_load;

pub use self::core::OmbscanConfig;

/// Fully resolved configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Scanner settings
    #[serde(default)]
    pub scan: ScanSettings,
}

/// Scanner settings (`[scan]` table)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanSettings {
    /// Substring identifying the header line
    pub marker: String,

    /// Glob matched against file names during the walk
    pub file_glob: String,

    /// 1-based whitespace-separated field read from the target line
    pub field: usize,

    /// Integer parts with this many characters or more are filtered out
    pub max_integer_digits: usize,

    /// Follow symbolic links while walking
    pub follow_symlinks: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            marker: "# Size".to_string(),
            file_glob: "*.out".to_string(),
            field: 2,
            max_integer_digits: 4,
            follow_symlinks: false,
        }
    }
}

impl ScanSettings {
    /// Reject settings the scanner cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            bail!("scan.marker must not be empty");
        }
        if self.file_glob.is_empty() {
            bail!("scan.file_glob must not be empty");
        }
        if self.field == 0 {
            bail!("scan.field is 1-based and must be at least 1");
        }
        if self.max_integer_digits == 0 {
            bail!("scan.max_integer_digits must be at least 1");
        }
        Ok(())
    }
}
