//! Time-bucketed smoothing and step-line construction for the charts.
//!
//! The fast cadence produces many samples per second; for the trend overlay
//! they are first compressed to one mean value per whole second, then run
//! through a short moving average. This is deliberately lossy.

const KERNEL: usize = 5;

/// Bucket samples into 1-second bins (floor of elapsed time), average each
/// bin, and return (bin ids ascending, bin means). With at least 5 bins the
/// means get a centered 5-point equal-weight moving average, zero-padded at
/// the edges so the output length equals the bin count.
pub fn smooth(times: &[f64], values: &[f64]) -> (Vec<i64>, Vec<f64>) {
    debug_assert_eq!(times.len(), values.len());

    let mut bins: Vec<i64> = Vec::new();
    let mut sums: Vec<f64> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();

    for (&t, &v) in times.iter().zip(values.iter()) {
        let bin = t.floor() as i64;
        match bins.binary_search(&bin) {
            Ok(i) => {
                sums[i] += v;
                counts[i] += 1;
            }
            Err(i) => {
                bins.insert(i, bin);
                sums.insert(i, v);
                counts.insert(i, 1);
            }
        }
    }

    let mut means: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&s, &c)| s / c as f64)
        .collect();

    if means.len() >= KERNEL {
        means = moving_average(&means);
    }

    (bins, means)
}

/// Same-length convolution with an equal-weight kernel of 5, zero padding
/// beyond the ends (edge outputs are pulled toward zero).
fn moving_average(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let half = (KERNEL / 2) as isize;
    let mut out = Vec::with_capacity(n);
    for i in 0..n as isize {
        let mut sum = 0.0;
        for j in -half..=half {
            let k = i + j;
            if k >= 0 && (k as usize) < n {
                sum += values[k as usize];
            }
        }
        out.push(sum / KERNEL as f64);
    }
    out
}

/// Turn a sparse binned sequence into a stair-step polyline: the first point
/// is emitted unchanged, every later point i contributes (x[i], y[i-1]) then
/// (x[i], y[i]). Output length is 2n-1. The plotted value holds over each
/// bin instead of interpolating between bin means.
pub fn step_line(xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(xs.len(), ys.len());

    let mut sx = Vec::new();
    let mut sy = Vec::new();
    for i in 0..xs.len() {
        if i == 0 {
            sx.push(xs[0]);
            sy.push(ys[0]);
        } else {
            sx.push(xs[i]);
            sy.push(ys[i - 1]);
            sx.push(xs[i]);
            sy.push(ys[i]);
        }
    }
    (sx, sy)
}
