use memwatch::backend::Sampler;
use memwatch::config::Config;

fn main() {
    env_logger::init();

    let config = Config::load();
    log::info!(
        "Sampling every {} ms, ranking every {} ms",
        config.sample_interval_ms,
        config.rank_interval_ms
    );

    let (sampler, rank_rx, series_rx) = Sampler::new(config);
    sampler.start();

    let mut latest_ranking = None;
    let mut last_status = std::time::Instant::now();

    // Snapshots arrive at the fast cadence; rankings are drained as they
    // come and a status line goes out about once a second.
    while let Ok(snapshot) = series_rx.recv() {
        while let Ok(ranking) = rank_rx.try_recv() {
            latest_ranking = Some(ranking);
        }

        if last_status.elapsed().as_secs() >= 1 {
            last_status = std::time::Instant::now();
            let mem = snapshot.mem.window_values.last().copied().unwrap_or(0.0);
            let vms = snapshot.vms.window_values.last().copied().unwrap_or(0.0);
            match &latest_ranking {
                Some(r) => {
                    let top = r
                        .rss
                        .first()
                        .map(|row| format!("{} ({:.1}%)", row.name, row.percent_of_total))
                        .unwrap_or_else(|| "-".into());
                    log::info!(
                        "t={:.1}s mem={:.2}GiB vms={:.2}GiB top={} logged={}/{} skipped={}",
                        snapshot.elapsed,
                        mem,
                        vms,
                        top,
                        snapshot.mem.saved,
                        snapshot.vms.saved,
                        r.skipped
                    );
                }
                None => {
                    log::info!(
                        "t={:.1}s mem={:.2}GiB vms={:.2}GiB logged={}/{}",
                        snapshot.elapsed,
                        mem,
                        vms,
                        snapshot.mem.saved,
                        snapshot.vms.saved
                    );
                }
            }
        }
    }
}
