mod log_record;
mod process_sample;
mod snapshot;

pub use log_record::{LogRecord, MetricKind};
pub use process_sample::{MemorySnapshot, Metric, ProcessSample, RankedRow};
pub use snapshot::{MetricSeries, RankingSnapshot, SeriesSnapshot};
