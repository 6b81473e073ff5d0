use memwatch::analyze::{self, LoadError};
use memwatch::model::MetricKind;
use std::io::Write;
use tempfile::tempdir;

fn write_tagged_lines(path: &std::path::Path, kind: &str, count: usize) {
    let mut f = std::fs::File::create(path).unwrap();
    for i in 0..count {
        writeln!(
            f,
            "{{\"timestamp\":{:.2},\"type\":\"{}\",\"value\":{:.1}}}",
            i as f64 * 0.05,
            kind,
            i as f64
        )
        .unwrap();
    }
}

#[test]
fn test_missing_file_is_empty_or_missing() {
    let dir = tempdir().unwrap();
    let result = analyze::load(&dir.path().join("absent.jsonl"), MetricKind::Mem);
    assert_eq!(result.unwrap_err(), LoadError::EmptyOrMissing);
}

#[test]
fn test_garbage_file_is_empty_or_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.jsonl");
    std::fs::write(&path, "this is not a log").unwrap();
    let result = analyze::load(&path, MetricKind::Mem);
    assert_eq!(result.unwrap_err(), LoadError::EmptyOrMissing);
}

#[test]
fn test_thirty_records_retain_twenty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mem_log.jsonl");
    write_tagged_lines(&path, "mem", 30);

    let series = analyze::load(&path, MetricKind::Mem).unwrap();
    assert_eq!(series.len(), 20);
    // First retained record is raw record 10, rebased to zero.
    assert_eq!(series.times[0], 0.0);
    assert!((series.values[0] - 10.0).abs() < 1e-9);
}

#[test]
fn test_twenty_nine_records_are_insufficient() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mem_log.jsonl");
    write_tagged_lines(&path, "mem", 29);

    let result = analyze::load(&path, MetricKind::Mem);
    assert_eq!(result.unwrap_err(), LoadError::InsufficientData);
}

#[test]
fn test_wrong_type_filter_is_insufficient() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mem_log.jsonl");
    write_tagged_lines(&path, "mem", 50);

    let result = analyze::load(&path, MetricKind::Vms);
    assert_eq!(result.unwrap_err(), LoadError::InsufficientData);
}

#[test]
fn test_untagged_legacy_records_are_excluded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mem_log.json");
    // Legacy export shape: array of records without a "type" field.
    let mut records = Vec::new();
    for i in 0..50 {
        records.push(format!(
            "{{\"timestamp\": {:.1}, \"value\": {:.1}}}",
            1000.0 + i as f64,
            i as f64
        ));
    }
    std::fs::write(&path, format!("[\n{}\n]", records.join(",\n"))).unwrap();

    let result = analyze::load(&path, MetricKind::Mem);
    assert_eq!(result.unwrap_err(), LoadError::InsufficientData);
}

#[test]
fn test_mixed_streams_filter_to_requested_kind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("combined.jsonl");
    let mut f = std::fs::File::create(&path).unwrap();
    for i in 0..80 {
        let kind = if i % 2 == 0 { "mem" } else { "vms" };
        writeln!(
            f,
            "{{\"timestamp\":{:.2},\"type\":\"{}\",\"value\":{:.1}}}",
            i as f64 * 0.05,
            kind,
            i as f64
        )
        .unwrap();
    }
    drop(f);

    let mem = analyze::load(&path, MetricKind::Mem).unwrap();
    // 80 raw, 10 trimmed, half of the remaining 70 are "mem".
    assert_eq!(mem.len(), 35);
    // Even raw indices carry even values.
    for &v in &mem.values {
        assert_eq!(v as i64 % 2, 0);
    }
}

#[test]
fn test_times_are_relative_to_first_retained() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vms_log.jsonl");
    write_tagged_lines(&path, "vms", 40);

    let series = analyze::load(&path, MetricKind::Vms).unwrap();
    assert_eq!(series.times[0], 0.0);
    let diffs: Vec<f64> = series.times.windows(2).map(|w| w[1] - w[0]).collect();
    for d in diffs {
        assert!((d - 0.05).abs() < 1e-9);
    }
}
