use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use super::directory::DirectoryWalker;
use super::extract::{Evaluation, ExtractRule, evaluate};
use super::types::{FileOutcome, MatchRecord, ScanResult, ScanStats, ScannerConfig};
use crate::config::Settings;
use crate::reports::Reporter;

/// Walks a directory of benchmark logs and evaluates each one
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScannerConfig,
    walker: DirectoryWalker,
}

impl Scanner {
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_config(ScannerConfig::from(&settings.scan))
    }

    pub fn with_config(config: ScannerConfig) -> Result<Self> {
        let walker = DirectoryWalker::new(&config.file_glob, config.follow_symlinks)?;
        Ok(Scanner { config, walker })
    }

    /// Scan every candidate under `root`, handing each outcome to `reporter`
    /// as soon as the file is done.
    pub fn scan(&self, root: &Path, offset: usize, reporter: &mut dyn Reporter) -> Result<ScanResult> {
        let start_time = Instant::now();
        let mut matches = Vec::new();
        let mut stats = ScanStats::default();

        tracing::info!("Scanning {} (offset {})", root.display(), offset);

        for path in self.walker.candidates(root) {
            let outcome = self.scan_file(&path, offset);
            stats.record(&outcome);
            reporter.on_outcome(&outcome)?;
            if let FileOutcome::Matched(record) = outcome {
                matches.push(record);
            }
        }

        stats.scan_duration_ms = start_time.elapsed().as_millis() as u64;
        tracing::info!(
            "Scanned {} files: {} matched, {} without marker, {} without target line, {} filtered",
            stats.files_scanned,
            stats.matches,
            stats.missing_marker,
            stats.missing_line,
            stats.rejected
        );

        Ok(ScanResult { matches, stats })
    }

    /// Evaluate a single file
    ///
    /// An unreadable file is logged and treated as having no marker line.
    pub fn scan_file(&self, path: &Path, offset: usize) -> FileOutcome {
        let contents = match std::fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return FileOutcome::MissingMarker {
                    path: path.to_path_buf(),
                };
            }
        };

        let rule = ExtractRule {
            marker: &self.config.marker,
            offset,
            field: self.config.field,
            max_integer_digits: self.config.max_integer_digits,
        };

        let path = path.to_path_buf();
        let outcome = match evaluate(&contents, &rule) {
            Evaluation::MissingMarker => FileOutcome::MissingMarker { path },
            Evaluation::MissingTargetLine(line) => FileOutcome::MissingTargetLine { path, line },
            Evaluation::Rejected { line, value } => FileOutcome::Rejected { path, line, value },
            Evaluation::Accepted { line, value } => FileOutcome::Matched(MatchRecord { path, line, value }),
        };
        tracing::debug!("{:?}", outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportContext, Reporter};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Collect {
        outcomes: Vec<FileOutcome>,
    }

    impl Reporter for Collect {
        fn on_outcome(&mut self, outcome: &FileOutcome) -> Result<()> {
            self.outcomes.push(outcome.clone());
            Ok(())
        }

        fn finish(&mut self, _context: &ReportContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    fn log_with_marker_at(marker_line: usize, rows: &[&str]) -> String {
        let mut lines: Vec<String> = (1..marker_line).map(|i| format!("# preamble {}", i)).collect();
        lines.push("# Size      Latency (us)".to_string());
        lines.extend(rows.iter().map(|r| r.to_string()));
        lines.join("\n") + "\n"
    }

    #[test]
    fn test_end_to_end_directory_scan() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data");
        fs::create_dir(&data).unwrap();

        // Marker at line 10, target line 33
        let mut rows: Vec<String> = (1..23).map(|i| format!("{} 9999.0", i)).collect();
        rows.push("lat 250.5".to_string());
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        fs::write(data.join("run1.out"), log_with_marker_at(10, &rows)).unwrap();
        fs::write(data.join("run2.out"), "no header here\n").unwrap();
        fs::write(data.join("ignored.txt"), log_with_marker_at(10, &rows)).unwrap();

        let scanner = Scanner::with_config(ScannerConfig::default()).unwrap();
        let mut collect = Collect::default();
        let result = scanner.scan(&data, 23, &mut collect).unwrap();

        assert_eq!(result.stats.files_scanned, 2);
        assert_eq!(
            result.matches,
            vec![MatchRecord {
                path: data.join("run1.out"),
                line: 33,
                value: "250.5".to_string(),
            }]
        );
        assert_eq!(
            collect.outcomes[1],
            FileOutcome::MissingMarker {
                path: data.join("run2.out")
            }
        );
    }

    #[test]
    fn test_scan_file_reports_missing_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("short.out");
        fs::write(&path, log_with_marker_at(5, &["1 2.0", "2 3.0"])).unwrap();

        let scanner = Scanner::with_config(ScannerConfig::default()).unwrap();
        assert_eq!(
            scanner.scan_file(&path, 3),
            FileOutcome::MissingTargetLine { path, line: 8 }
        );
    }

    #[test]
    fn test_unreadable_file_counts_as_missing_marker() {
        let scanner = Scanner::with_config(ScannerConfig::default()).unwrap();
        let path = PathBuf::from("definitely/not/here.out");
        assert_eq!(
            scanner.scan_file(&path, 1),
            FileOutcome::MissingMarker { path }
        );
    }

    #[test]
    fn test_custom_digit_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wide.out");
        fs::write(&path, log_with_marker_at(1, &["foo 1500 bar"])).unwrap();

        let strict = Scanner::with_config(ScannerConfig::default()).unwrap();
        assert!(matches!(strict.scan_file(&path, 1), FileOutcome::Rejected { .. }));

        let relaxed = Scanner::with_config(ScannerConfig {
            max_integer_digits: 5,
            ..ScannerConfig::default()
        })
        .unwrap();
        assert!(matches!(relaxed.scan_file(&path, 1), FileOutcome::Matched(_)));
    }

    #[test]
    fn test_non_utf8_content_is_decoded_lossily() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.out");
        let mut bytes = b"\xff\xfe junk\n# Size x\n".to_vec();
        bytes.extend_from_slice(b"foo 12 bar\n");
        fs::write(&path, bytes).unwrap();

        let scanner = Scanner::with_config(ScannerConfig::default()).unwrap();
        assert!(matches!(scanner.scan_file(&path, 1), FileOutcome::Matched(_)));
    }
}
