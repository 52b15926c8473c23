pub mod core;
pub mod directory;
pub mod extract;
pub mod types;

// Re-export main types for easier access
pub use self::core::Scanner;
pub use directory::DirectoryWalker;
pub use extract::{Evaluation, ExtractRule, is_valid_offset};
pub use types::{FileOutcome, MatchRecord, ScanResult, ScanStats, ScannerConfig};
