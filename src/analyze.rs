//! Offline analysis of persisted memory logs: load and filter a recorded
//! series, compute its mean, find peak clusters, answer nearest-point
//! queries for hover-style inspection.

use crate::model::{LogRecord, MetricKind};
use std::fmt;
use std::fs;
use std::path::Path;

/// How many leading records are discarded before filtering. The first few
/// samples after startup routinely carry transient noise.
pub const LEADING_TRIM: usize = 10;

/// Minimum usable records after filtering.
pub const MIN_RECORDS: usize = 20;

/// Peaks are values within this fraction of the maximum.
pub const PEAK_THRESHOLD: f64 = 0.98;

/// User-visible load statuses. Neither aborts the caller; both read as
/// "insufficient data" and leave the analyzer usable for another file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// File missing, unreadable, or not parsable as a log.
    EmptyOrMissing,
    /// Fewer than MIN_RECORDS usable records after trim and filter.
    InsufficientData,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::EmptyOrMissing => write!(f, "log file missing or empty"),
            LoadError::InsufficientData => write!(f, "not enough data"),
        }
    }
}

/// A loaded log: times rebased to the first retained record, values in GiB.
/// Both vectors always have the same length.
#[derive(Debug, Clone, Default)]
pub struct LoadedSeries {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl LoadedSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Load a persisted log and reduce it to the requested metric's series.
/// Accepts both on-disk shapes: the continuous JSON-lines file and the
/// legacy pretty-printed JSON array. The first LEADING_TRIM raw records are
/// dropped unconditionally; records without a matching `type` tag are
/// excluded (untagged legacy records never match).
pub fn load(path: &Path, kind: MetricKind) -> Result<LoadedSeries, LoadError> {
    let text = fs::read_to_string(path).map_err(|_| LoadError::EmptyOrMissing)?;
    let records = parse_records(&text).ok_or(LoadError::EmptyOrMissing)?;

    let filtered: Vec<&LogRecord> = records
        .iter()
        .skip(LEADING_TRIM)
        .filter(|r| r.kind == Some(kind))
        .collect();

    if filtered.len() < MIN_RECORDS {
        return Err(LoadError::InsufficientData);
    }

    let t0 = filtered[0].timestamp;
    Ok(LoadedSeries {
        times: filtered.iter().map(|r| r.timestamp - t0).collect(),
        values: filtered.iter().map(|r| r.value).collect(),
    })
}

/// Parse either a JSON array of records or one record per line. A partially
/// written trailing line (live writer racing the reader) is tolerated in
/// line form; any other parse failure means no records.
fn parse_records(text: &str) -> Option<Vec<LogRecord>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).ok();
    }

    let mut records = Vec::new();
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    for (i, line) in lines.iter().enumerate() {
        match serde_json::from_str::<LogRecord>(line) {
            Ok(r) => records.push(r),
            Err(_) if i == lines.len() - 1 => break,
            Err(_) => return None,
        }
    }
    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Indices of all values within `relative_threshold` of the maximum.
/// Several near-equal peaks are all reported, not just the single maximum.
pub fn detect_peaks(values: &[f64], relative_threshold: f64) -> Vec<usize> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Vec::new();
    }
    let threshold = max * relative_threshold;
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v >= threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Index of the time closest to `query`, linear scan, first occurrence wins
/// ties. None for an empty slice.
pub fn nearest(times: &[f64], query: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &t) in times.iter().enumerate() {
        let dist = (t - query).abs();
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_is_arithmetic() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn single_peak_when_runner_up_misses_threshold() {
        // 49 < 50 * 0.98 = 49.0 is false; 49 >= 49.0 fails only below 49.
        let peaks = detect_peaks(&[10.0, 20.0, 50.0, 48.9, 5.0], 0.98);
        assert_eq!(peaks, vec![2]);
    }

    #[test]
    fn boundary_value_at_threshold_counts() {
        // 49.0 == 50 * 0.98 exactly, so it is included.
        let peaks = detect_peaks(&[10.0, 20.0, 50.0, 49.0, 5.0], 0.98);
        assert_eq!(peaks, vec![2, 3]);
    }

    #[test]
    fn equal_maxima_all_reported() {
        let peaks = detect_peaks(&[10.0, 20.0, 50.0, 50.0, 5.0], 0.98);
        assert_eq!(peaks, vec![2, 3]);
    }

    #[test]
    fn no_peaks_in_empty_input() {
        assert!(detect_peaks(&[], 0.98).is_empty());
    }

    #[test]
    fn nearest_prefers_smaller_distance() {
        // query 3.4: |2 - 3.4| = 1.4 beats |5 - 3.4| = 1.6
        assert_eq!(nearest(&[0.0, 1.0, 2.0, 5.0], 3.4), Some(2));
    }

    #[test]
    fn nearest_tie_takes_first_occurrence() {
        assert_eq!(nearest(&[1.0, 3.0], 2.0), Some(0));
    }

    #[test]
    fn nearest_of_empty_is_none() {
        assert_eq!(nearest(&[], 1.0), None);
    }

    #[test]
    fn array_and_line_formats_both_parse() {
        let array = r#"[
  {"timestamp": 1.0, "type": "mem", "value": 2.5},
  {"timestamp": 2.0, "type": "mem", "value": 2.6}
]"#;
        assert_eq!(parse_records(array).unwrap().len(), 2);

        let lines = "{\"timestamp\":1.0,\"type\":\"mem\",\"value\":2.5}\n\
                     {\"timestamp\":2.0,\"type\":\"mem\",\"value\":2.6}\n";
        assert_eq!(parse_records(lines).unwrap().len(), 2);
    }

    #[test]
    fn truncated_trailing_line_is_tolerated() {
        let lines = "{\"timestamp\":1.0,\"type\":\"mem\",\"value\":2.5}\n\
                     {\"timestamp\":2.0,\"ty";
        assert_eq!(parse_records(lines).unwrap().len(), 1);
    }

    #[test]
    fn untagged_records_parse_but_carry_no_kind() {
        let array = r#"[{"timestamp": 1.0, "value": 2.5}]"#;
        let records = parse_records(array).unwrap();
        assert_eq!(records[0].kind, None);
    }

    #[test]
    fn garbage_is_no_records() {
        assert!(parse_records("not json at all").is_none());
        assert!(parse_records("").is_none());
    }
}
