use crate::model::{MemorySnapshot, ProcessSample};
use std::fs;

/// What the samplers need from the OS: a process list and instantaneous
/// memory totals. Trait so tests can substitute a canned probe.
pub trait SystemProbe {
    /// List running processes. Entries that vanish or are unreadable
    /// mid-enumeration are skipped; the second value counts the skips.
    fn list_processes(&self) -> (Vec<ProcessSample>, usize);

    fn memory(&self) -> MemorySnapshot;
}

/// Probe backed by /proc.
pub struct ProcProbe;

impl ProcProbe {
    pub fn new() -> Self {
        Self
    }
}

impl SystemProbe for ProcProbe {
    fn list_processes(&self) -> (Vec<ProcessSample>, usize) {
        let mut processes = Vec::new();
        let mut skipped = 0usize;

        let entries = match fs::read_dir("/proc") {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Failed to read /proc: {}", e);
                return (processes, skipped);
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let pid: i32 = match name.to_string_lossy().parse() {
                Ok(p) => p,
                Err(_) => continue,
            };

            match read_process(pid) {
                Some(sample) => processes.push(sample),
                // The process exited or denied access between readdir and
                // read; expected, not an error.
                None => skipped += 1,
            }
        }

        (processes, skipped)
    }

    fn memory(&self) -> MemorySnapshot {
        let mut snap = MemorySnapshot::default();
        let meminfo = fs::read_to_string("/proc/meminfo").unwrap_or_default();

        let mut available = 0u64;
        let mut swap_free = 0u64;
        for line in meminfo.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                continue;
            }
            let val: u64 = parts[1].parse().unwrap_or(0) * 1024; // kB to bytes
            match parts[0] {
                "MemTotal:" => snap.total = val,
                "MemAvailable:" => available = val,
                "SwapTotal:" => snap.swap_total = val,
                "SwapFree:" => swap_free = val,
                _ => {}
            }
        }
        snap.used = snap.total.saturating_sub(available);
        snap.swap_used = snap.swap_total.saturating_sub(swap_free);

        snap
    }
}

fn read_process(pid: i32) -> Option<ProcessSample> {
    let status = fs::read_to_string(format!("/proc/{}/status", pid)).ok()?;

    let mut name = String::new();
    let mut resident_bytes = 0u64;
    let mut virtual_bytes = 0u64;

    for line in status.lines() {
        if let Some(val) = line.strip_prefix("Name:") {
            name = val.trim().to_string();
        } else if let Some(val) = line.strip_prefix("VmRSS:") {
            resident_bytes = parse_kb(val);
        } else if let Some(val) = line.strip_prefix("VmSize:") {
            virtual_bytes = parse_kb(val);
        }
    }

    if name.is_empty() {
        return None;
    }

    Some(ProcessSample {
        pid,
        name,
        resident_bytes,
        virtual_bytes,
    })
}

fn parse_kb(field: &str) -> u64 {
    field
        .trim()
        .split_whitespace()
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0)
        * 1024
}
