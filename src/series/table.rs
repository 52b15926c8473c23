use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref ROW: Regex = Regex::new(r"^(\d+)\s+([\d.]+)").unwrap();
}

/// Floor substituted for zero readings so log-scale consumers never see 0
pub const ZERO_FLOOR: f64 = 1e-3;

/// One `size value` row of an OMB result table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub size: u64,
    pub value: f64,
}

/// Collect every measurement row in file order
///
/// A row is any line starting with an unsigned size followed by whitespace
/// and a numeric reading; header and job-script chatter is skipped, as are
/// rows whose reading does not parse (e.g. `1.2.3`).
pub fn parse_rows(contents: &str) -> Vec<Measurement> {
    contents
        .lines()
        .filter_map(|line| {
            let caps = ROW.captures(line)?;
            let size = caps[1].parse().ok()?;
            let value: f64 = caps[2].parse().ok()?;
            Some(Measurement {
                size,
                value: if value == 0.0 { ZERO_FLOOR } else { value },
            })
        })
        .collect()
}
