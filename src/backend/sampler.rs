use crate::backend::logger::MemoryLog;
use crate::backend::ranker;
use crate::backend::series::MemorySeries;
use crate::backend::smooth::{smooth, step_line};
use crate::backend::system::{ProcProbe, SystemProbe};
use crate::config::Config;
use crate::model::{Metric, MetricKind, MetricSeries, RankingSnapshot, SeriesSnapshot};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const GIB: f64 = (1u64 << 30) as f64;

/// Drives the two sampling cadences on their own worker threads. The slow
/// thread ranks processes; the fast thread feeds the rolling series, the
/// smoothed step lines and the continuous logs. Each thread owns its state
/// outright, so consumers only ever see cloned snapshots.
pub struct Sampler {
    config: Config,
    rank_tx: flume::Sender<RankingSnapshot>,
    series_tx: flume::Sender<SeriesSnapshot>,
}

impl Sampler {
    pub fn new(
        config: Config,
    ) -> (
        Self,
        flume::Receiver<RankingSnapshot>,
        flume::Receiver<SeriesSnapshot>,
    ) {
        let (rank_tx, rank_rx) = flume::bounded(2);
        let (series_tx, series_rx) = flume::bounded(2);
        (
            Self {
                config,
                rank_tx,
                series_tx,
            },
            rank_rx,
            series_rx,
        )
    }

    pub fn start(self) {
        let Sampler {
            config,
            rank_tx,
            series_tx,
        } = self;

        let rank_config = config.clone();
        thread::Builder::new()
            .name("ranker".into())
            .spawn(move || run_ranker(rank_config, rank_tx))
            .expect("Failed to spawn ranker thread");

        thread::Builder::new()
            .name("sampler".into())
            .spawn(move || run_series(config, series_tx))
            .expect("Failed to spawn sampler thread");
    }
}

/// Slow cadence: enumerate once, rank by both metrics, publish.
fn run_ranker(config: Config, tx: flume::Sender<RankingSnapshot>) {
    let probe = ProcProbe::new();
    let interval = Duration::from_millis(config.rank_interval_ms);

    loop {
        // Total memory is re-queried every cycle; it can change (hot-add).
        let mem = probe.memory();
        let (procs, skipped) = probe.list_processes();
        if skipped > 0 {
            log::debug!("Skipped {} processes during enumeration", skipped);
        }

        let snapshot = RankingSnapshot {
            rss: ranker::rank(&procs, Metric::Resident, mem.total, config.top_n),
            vms: ranker::rank(&procs, Metric::Virtual, mem.total, config.top_n),
            skipped,
            total_physical: mem.total,
        };

        if publish(&tx, snapshot).is_err() {
            log::info!("Ranking channel closed, shutting down");
            break;
        }

        thread::sleep(interval);
    }
}

/// Fast cadence: sample memory, extend the series, rebuild the 60 s window
/// with smoothing and step lines, append to both logs, publish.
fn run_series(config: Config, tx: flume::Sender<SeriesSnapshot>) {
    let probe = ProcProbe::new();
    let interval = Duration::from_millis(config.sample_interval_ms);
    let start = Instant::now();

    let mut series = MemorySeries::new(config.series_capacity);
    let mut mem_log = open_log(MetricKind::Mem, &config.mem_log_path);
    let mut vms_log = open_log(MetricKind::Vms, &config.vms_log_path);
    let mut last_export = Instant::now();

    loop {
        let elapsed = start.elapsed().as_secs_f64();
        let snap = probe.memory();
        let mem_gb = snap.used as f64 / GIB;
        let vms_gb = (snap.used + snap.swap_used) as f64 / GIB;

        series.push(elapsed, mem_gb, vms_gb);
        let (win_t, win_m, win_v) = series.window(config.window_secs);

        let mem_saved = append_log(&mut mem_log, elapsed, mem_gb);
        let vms_saved = append_log(&mut vms_log, elapsed, vms_gb);

        let snapshot = SeriesSnapshot {
            elapsed,
            mem: metric_series(&win_t, &win_m, mem_saved, snap.total as f64 / GIB),
            vms: metric_series(
                &win_t,
                &win_v,
                vms_saved,
                (snap.total + snap.swap_total) as f64 / GIB,
            ),
        };

        if config.export_interval_secs > 0
            && last_export.elapsed().as_secs() >= config.export_interval_secs
        {
            export_log(&mem_log, &config.mem_export_path);
            export_log(&vms_log, &config.vms_export_path);
            last_export = Instant::now();
        }

        if publish(&tx, snapshot).is_err() {
            log::info!("Series channel closed, shutting down");
            break;
        }

        thread::sleep(interval);
    }
}

fn metric_series(times: &[f64], values: &[f64], saved: u64, axis_max_gb: f64) -> MetricSeries {
    let (bins, means) = smooth(times, values);
    let bin_times: Vec<f64> = bins.iter().map(|&b| b as f64).collect();
    let (step_times, step_values) = step_line(&bin_times, &means);
    MetricSeries {
        window_times: times.to_vec(),
        window_values: values.to_vec(),
        step_times,
        step_values,
        saved,
        axis_max_gb,
    }
}

fn open_log(kind: MetricKind, path: &Path) -> Option<MemoryLog> {
    match MemoryLog::open(kind, path) {
        Ok(log) => Some(log),
        Err(e) => {
            // Sampling keeps running without persistence.
            log::error!("{}", e);
            None
        }
    }
}

fn append_log(log: &mut Option<MemoryLog>, timestamp: f64, value: f64) -> u64 {
    match log {
        Some(l) => {
            if let Err(e) = l.append(timestamp, value) {
                log::warn!("{}", e);
            }
            l.saved()
        }
        None => 0,
    }
}

fn export_log(log: &Option<MemoryLog>, path: &Path) {
    if let Some(l) = log {
        match l.export(path) {
            Ok(count) => log::info!("Exported {} records to {}", count, path.display()),
            Err(e) => log::warn!("{}", e),
        }
    }
}

/// Non-blocking publish. A full channel means the consumer is behind; the
/// snapshot is dropped and a fresher one follows next tick, so a stalled
/// consumer can never hold up sampling.
fn publish<T>(tx: &flume::Sender<T>, snapshot: T) -> Result<(), ()> {
    match tx.try_send(snapshot) {
        Ok(()) => Ok(()),
        Err(flume::TrySendError::Full(_)) => Ok(()),
        Err(flume::TrySendError::Disconnected(_)) => Err(()),
    }
}
