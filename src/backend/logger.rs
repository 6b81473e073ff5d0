use crate::model::{LogRecord, MetricKind};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only log for one metric stream. Records are kept in memory and
/// mirrored to disk one JSON line at a time, flushed per append, so a crash
/// loses at most the record being written. The save counter only advances
/// when the record actually reached the file.
pub struct MemoryLog {
    kind: MetricKind,
    path: PathBuf,
    file: File,
    records: Vec<LogRecord>,
    saved: u64,
}

impl MemoryLog {
    pub fn open(kind: MetricKind, path: &Path) -> Result<Self, String> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
        Ok(Self {
            kind,
            path: path.to_path_buf(),
            file,
            records: Vec::new(),
            saved: 0,
        })
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. Every written record carries the metric tag.
    pub fn append(&mut self, timestamp: f64, value: f64) -> Result<(), String> {
        let record = LogRecord {
            timestamp,
            kind: Some(self.kind),
            value,
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| format!("Failed to serialize log record: {}", e))?;
        writeln!(self.file, "{}", line)
            .map_err(|e| format!("Failed to write log record: {}", e))?;
        self.file
            .flush()
            .map_err(|e| format!("Failed to flush log file: {}", e))?;

        self.records.push(record);
        self.saved += 1;
        Ok(())
    }

    /// Records persisted so far.
    pub fn saved(&self) -> u64 {
        self.saved
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Write the whole in-memory log as a pretty-printed JSON array, the
    /// user-triggered export format. Returns the record count.
    pub fn export(&self, path: &Path) -> Result<usize, String> {
        let data = serde_json::to_string_pretty(&self.records)
            .map_err(|e| format!("Failed to serialize log: {}", e))?;
        std::fs::write(path, data)
            .map_err(|e| format!("Failed to write export {}: {}", path.display(), e))?;
        Ok(self.records.len())
    }
}
