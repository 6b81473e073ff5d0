use super::RankedRow;

/// Published by the slow cadence once per ranking cycle.
#[derive(Debug, Clone, Default)]
pub struct RankingSnapshot {
    pub rss: Vec<RankedRow>,
    pub vms: Vec<RankedRow>,
    /// Processes that vanished or were unreadable during enumeration.
    pub skipped: usize,
    pub total_physical: u64,
}

/// Render-ready data for one metric's chart.
#[derive(Debug, Clone, Default)]
pub struct MetricSeries {
    pub window_times: Vec<f64>,
    pub window_values: Vec<f64>,
    pub step_times: Vec<f64>,
    pub step_values: Vec<f64>,
    /// Records persisted so far for this metric.
    pub saved: u64,
    /// Upper bound for the Y axis, in GiB.
    pub axis_max_gb: f64,
}

/// Published by the fast cadence once per sampling tick.
#[derive(Debug, Clone, Default)]
pub struct SeriesSnapshot {
    pub elapsed: f64,
    pub mem: MetricSeries,
    pub vms: MetricSeries,
}
