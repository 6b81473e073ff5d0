use crate::model::{Metric, ProcessSample, RankedRow};

/// How many rows a ranking pass keeps.
pub const TOP_N: usize = 512;

/// Rank processes descending by the chosen metric and keep the top `limit`.
/// The sort is stable, so ties keep enumeration order. Percent is computed
/// against `total_physical` queried this cycle; a zero total yields 0%.
pub fn rank(
    processes: &[ProcessSample],
    metric: Metric,
    total_physical: u64,
    limit: usize,
) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = processes
        .iter()
        .map(|p| {
            let size_bytes = match metric {
                Metric::Resident => p.resident_bytes,
                Metric::Virtual => p.virtual_bytes,
            };
            let percent_of_total = if total_physical > 0 {
                size_bytes as f64 / total_physical as f64 * 100.0
            } else {
                0.0
            };
            RankedRow {
                pid: p.pid,
                name: p.name.clone(),
                size_bytes,
                percent_of_total,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    rows.truncate(limit);
    rows
}
