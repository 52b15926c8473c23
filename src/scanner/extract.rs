//! Line-level extraction rules
//!
//! Everything here works on an in-memory file body: locate the header line,
//! step down to the target line, pull one whitespace-separated field and
//! decide whether it passes the magnitude filter. Line numbers are 1-based.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OFFSET_PATTERN: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref NUMERIC_FIELD: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap();
}

/// What a single file body yields under an [`ExtractRule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// No line contains the marker
    MissingMarker,
    /// The target line does not exist or is empty
    MissingTargetLine(usize),
    /// Target line found, but the field is absent, not numeric, or too long
    Rejected { line: usize, value: Option<String> },
    /// The field passed every check
    Accepted { line: usize, value: String },
}

/// Parameters for [`evaluate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRule<'a> {
    pub marker: &'a str,
    pub offset: usize,
    pub field: usize,
    pub max_integer_digits: usize,
}

/// Run the full marker → target line → field → filter chain over a file body
pub fn evaluate(contents: &str, rule: &ExtractRule<'_>) -> Evaluation {
    // `lines` also drops the `\r` of CRLF endings
    let lines: Vec<&str> = contents.lines().collect();

    let Some(marker_line) = find_marker_line(&lines, rule.marker) else {
        return Evaluation::MissingMarker;
    };

    let target = target_line_number(marker_line, rule.offset);
    let Some(target_text) = line_at(&lines, target) else {
        return Evaluation::MissingTargetLine(target);
    };

    match nth_field(target_text, rule.field) {
        Some(value) if is_numeric_field(value) && passes_digit_limit(value, rule.max_integer_digits) => {
            Evaluation::Accepted {
                line: target,
                value: value.to_string(),
            }
        }
        value => Evaluation::Rejected {
            line: target,
            value: value.map(str::to_string),
        },
    }
}

/// 1-based number of the first line containing `marker`
pub fn find_marker_line(lines: &[&str], marker: &str) -> Option<usize> {
    lines.iter().position(|line| line.contains(marker)).map(|idx| idx + 1)
}

/// Line number `offset` lines below the marker
pub fn target_line_number(marker_line: usize, offset: usize) -> usize {
    marker_line.saturating_add(offset)
}

/// Line `number` (1-based); empty lines count as missing
pub fn line_at<'a>(lines: &[&'a str], number: usize) -> Option<&'a str> {
    let idx = number.checked_sub(1)?;
    lines.get(idx).copied().filter(|line| !line.is_empty())
}

/// The `field`-th (1-based) whitespace-separated token
pub fn nth_field(line: &str, field: usize) -> Option<&str> {
    line.split_whitespace().nth(field.checked_sub(1)?)
}

/// Unsigned integer or decimal, nothing else
pub fn is_numeric_field(token: &str) -> bool {
    NUMERIC_FIELD.is_match(token)
}

/// Text before the first `.`, or the whole token
pub fn integer_part(token: &str) -> &str {
    token.split('.').next().unwrap_or(token)
}

/// Character-count test on the integer part, not a numeric comparison:
/// `0000` is rejected with a limit of 4 even though it is zero.
pub fn passes_digit_limit(token: &str, max_integer_digits: usize) -> bool {
    integer_part(token).chars().count() < max_integer_digits
}

/// Accepts one or more ASCII digits only
pub fn is_valid_offset(raw: &str) -> bool {
    OFFSET_PATTERN.is_match(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(offset: usize) -> ExtractRule<'static> {
        ExtractRule {
            marker: "# Size",
            offset,
            field: 2,
            max_integer_digits: 4,
        }
    }

    fn body_with_target(marker_at: usize, offset: usize, target: &str) -> String {
        let mut lines = Vec::new();
        for i in 1..marker_at {
            lines.push(format!("# header {}", i));
        }
        lines.push("# Size      Bandwidth (MB/s)".to_string());
        for i in 1..offset {
            lines.push(format!("{} 99999.00", i));
        }
        lines.push(target.to_string());
        lines.join("\n")
    }

    #[test]
    fn test_offset_validation() {
        assert!(is_valid_offset("0"));
        assert!(is_valid_offset("23"));
        assert!(!is_valid_offset("-1"));
        assert!(!is_valid_offset("3.5"));
        assert!(!is_valid_offset("abc"));
        assert!(!is_valid_offset(""));
        assert!(!is_valid_offset("2 3"));
    }

    #[test]
    fn test_numeric_field_shape() {
        assert!(is_numeric_field("512"));
        assert!(is_numeric_field("250.5"));
        assert!(!is_numeric_field("abc"));
        assert!(!is_numeric_field("1."));
        assert!(!is_numeric_field(".5"));
        assert!(!is_numeric_field("-3"));
        assert!(!is_numeric_field("1e3"));
    }

    #[test]
    fn test_digit_limit_counts_characters() {
        assert!(passes_digit_limit("512", 4));
        assert!(passes_digit_limit("999.99", 4));
        assert!(!passes_digit_limit("1500", 4));
        assert!(!passes_digit_limit("0000", 4));
        assert!(passes_digit_limit("007", 4));
        assert_eq!(integer_part("250.5"), "250");
        assert_eq!(integer_part("42"), "42");
    }

    #[test]
    fn test_marker_is_first_occurrence() {
        let lines = ["intro", "# Size a", "x", "# Size b"];
        assert_eq!(find_marker_line(&lines, "# Size"), Some(2));
        assert_eq!(find_marker_line(&lines, "# Latency"), None);
    }

    #[test]
    fn test_line_at_treats_empty_as_missing() {
        let lines = ["a", "", "c"];
        assert_eq!(line_at(&lines, 1), Some("a"));
        assert_eq!(line_at(&lines, 2), None);
        assert_eq!(line_at(&lines, 4), None);
        assert_eq!(line_at(&lines, 0), None);
    }

    #[test]
    fn test_nth_field_splits_runs_of_whitespace() {
        assert_eq!(nth_field("  foo \t 512   bar", 2), Some("512"));
        assert_eq!(nth_field("foo", 2), None);
        assert_eq!(nth_field("foo bar", 0), None);
    }

    #[test]
    fn test_evaluate_missing_marker() {
        assert_eq!(evaluate("no header\n1 2\n", &rule(1)), Evaluation::MissingMarker);
    }

    #[test]
    fn test_evaluate_missing_target_line() {
        // Marker at line 5, offset 3, only 7 lines
        let body = "a\nb\nc\nd\n# Size x\nf\ng";
        assert_eq!(evaluate(body, &rule(3)), Evaluation::MissingTargetLine(8));
    }

    #[test]
    fn test_evaluate_accepts_short_integer_part() {
        let body = body_with_target(5, 3, "foo 512 bar");
        assert_eq!(
            evaluate(&body, &rule(3)),
            Evaluation::Accepted {
                line: 8,
                value: "512".to_string()
            }
        );
    }

    #[test]
    fn test_evaluate_rejects_long_integer_part() {
        let body = body_with_target(5, 3, "foo 1500 bar");
        assert_eq!(
            evaluate(&body, &rule(3)),
            Evaluation::Rejected {
                line: 8,
                value: Some("1500".to_string())
            }
        );
    }

    #[test]
    fn test_evaluate_rejects_non_numeric_and_absent_fields() {
        let body = body_with_target(2, 1, "foo abc bar");
        assert!(matches!(evaluate(&body, &rule(1)), Evaluation::Rejected { .. }));

        let body = body_with_target(2, 1, "lonely");
        assert_eq!(
            evaluate(&body, &rule(1)),
            Evaluation::Rejected { line: 3, value: None }
        );
    }

    #[test]
    fn test_evaluate_tolerates_crlf_line_endings() {
        let body = body_with_target(3, 2, "2 512").replace('\n', "\r\n") + "\r\n";
        assert_eq!(
            evaluate(&body, &rule(2)),
            Evaluation::Accepted {
                line: 5,
                value: "512".to_string()
            }
        );
    }

    #[test]
    fn test_evaluate_zero_offset_reads_marker_line() {
        // Marker line itself: second field is "Size", which is not numeric
        let body = "# Size 12\n";
        assert!(matches!(evaluate(body, &rule(0)), Evaluation::Rejected { line: 1, .. }));
    }

    #[test]
    fn test_evaluate_osu_bibw_layout() {
        let mut body = String::from(
            "Running on nodes a and b\n\
             # OSU MPI Bi-Directional Bandwidth Test v7.4\n\
             # Size      Bandwidth (MB/s)\n",
        );
        let mut size = 1u64;
        for _ in 0..23 {
            body.push_str(&format!("{:<12}{:.2}\n", size, 250.5));
            size *= 2;
        }
        let result = evaluate(&body, &rule(23));
        assert_eq!(
            result,
            Evaluation::Accepted {
                line: 26,
                value: "250.50".to_string()
            }
        );
    }
}
