//! Offline viewer for memwatch logs: prints summary statistics, peak
//! positions and nearest-point lookups for a recorded metric series.

use memwatch::analyze;
use memwatch::model::MetricKind;
use std::path::PathBuf;
use std::process::exit;

struct Args {
    path: PathBuf,
    kind: MetricKind,
    peaks: bool,
    near: Vec<f64>,
}

fn usage() -> ! {
    eprintln!(
        "Usage: memwatch-logview <log-file> [--type mem|vms] [--peaks] [--near <seconds>]..."
    );
    exit(2);
}

fn parse_args() -> Args {
    let mut path: Option<PathBuf> = None;
    let mut kind: Option<MetricKind> = None;
    let mut peaks = false;
    let mut near = Vec::new();

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--type" => match iter.next().as_deref() {
                Some("mem") => kind = Some(MetricKind::Mem),
                Some("vms") => kind = Some(MetricKind::Vms),
                _ => usage(),
            },
            "--peaks" => peaks = true,
            "--near" => match iter.next().and_then(|s| s.parse().ok()) {
                Some(x) => near.push(x),
                None => usage(),
            },
            _ if arg.starts_with("--") => usage(),
            _ => {
                if path.is_some() {
                    usage();
                }
                path = Some(PathBuf::from(arg));
            }
        }
    }

    let path = match path {
        Some(p) => p,
        None => usage(),
    };

    // Metric selection follows the filename unless overridden, mirroring
    // the mem_log / vms_log file pair the sampler writes.
    let kind = kind.unwrap_or_else(|| {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string());
        match name {
            Some(n) if n.contains("mem") => MetricKind::Mem,
            _ => MetricKind::Vms,
        }
    });

    Args {
        path,
        kind,
        peaks,
        near,
    }
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let series = match analyze::load(&args.path, args.kind) {
        Ok(s) => s,
        Err(e) => {
            // A thin or missing log is a status, not a failure.
            println!("{}: {}", args.path.display(), e);
            return;
        }
    };

    let duration = series.times.last().copied().unwrap_or(0.0);
    println!(
        "{} [{}]: {} records over {:.2}s",
        args.path.display(),
        args.kind.as_str(),
        series.len(),
        duration
    );
    println!("mean: {:.3} GiB", analyze::mean(&series.values));

    if args.peaks {
        let peaks = analyze::detect_peaks(&series.values, analyze::PEAK_THRESHOLD);
        println!("peaks ({}):", peaks.len());
        for i in peaks {
            println!("  t={:.2}s value={:.3} GiB", series.times[i], series.values[i]);
        }
    }

    for query in args.near {
        match analyze::nearest(&series.times, query) {
            Some(i) => println!(
                "near {:.2}s: t={:.2}s value={:.3} GiB",
                query, series.times[i], series.values[i]
            ),
            None => println!("near {:.2}s: no data", query),
        }
    }
}
