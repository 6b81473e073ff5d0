/// One process as seen during a single ranking cycle. Produced fresh each
/// cycle; no identity is tracked across cycles.
#[derive(Debug, Clone)]
pub struct ProcessSample {
    pub pid: i32,
    pub name: String,
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
}

/// A ranked table row derived from a ProcessSample.
#[derive(Debug, Clone)]
pub struct RankedRow {
    pub pid: i32,
    pub name: String,
    pub size_bytes: u64,
    pub percent_of_total: f64,
}

/// Which per-process size a ranking pass sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Resident,
    Virtual,
}

/// Instantaneous host memory reading, all values in bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySnapshot {
    pub total: u64,
    pub used: u64,
    pub swap_total: u64,
    pub swap_used: u64,
}
