use std::collections::VecDeque;

/// Default retention: ~102 seconds of 50 ms samples.
pub const MAX_POINTS: usize = 2048;

/// Rolling store of three parallel sequences: elapsed time, physical memory
/// and physical+swap, both in GiB. All three always have the same length;
/// the oldest point is evicted first once capacity is reached.
#[derive(Debug, Clone)]
pub struct MemorySeries {
    capacity: usize,
    times: VecDeque<f64>,
    mem_gb: VecDeque<f64>,
    vms_gb: VecDeque<f64>,
}

impl MemorySeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            times: VecDeque::with_capacity(capacity),
            mem_gb: VecDeque::with_capacity(capacity),
            vms_gb: VecDeque::with_capacity(capacity),
        }
    }

    /// Append one point to all three sequences. Evicts the oldest point
    /// first when full, so the length invariant holds after every call.
    pub fn push(&mut self, elapsed: f64, mem_gb: f64, vms_gb: f64) {
        if self.times.len() == self.capacity {
            self.times.pop_front();
            self.mem_gb.pop_front();
            self.vms_gb.pop_front();
        }
        self.times.push_back(elapsed);
        self.mem_gb.push_back(mem_gb);
        self.vms_gb.push_back(vms_gb);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// All points with elapsed time within `lookback_secs` of the latest
    /// point, as (times, mem, vms). Empty store gives three empty vectors.
    pub fn window(&self, lookback_secs: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let latest = match self.times.back() {
            Some(&t) => t,
            None => return (Vec::new(), Vec::new(), Vec::new()),
        };
        let cutoff = latest - lookback_secs;

        let mut times = Vec::new();
        let mut mem = Vec::new();
        let mut vms = Vec::new();
        for ((&t, &m), &v) in self
            .times
            .iter()
            .zip(self.mem_gb.iter())
            .zip(self.vms_gb.iter())
        {
            if t >= cutoff {
                times.push(t);
                mem.push(m);
                vms.push(v);
            }
        }
        (times, mem, vms)
    }
}

impl Default for MemorySeries {
    fn default() -> Self {
        Self::new(MAX_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_lengths_after_every_push() {
        let mut s = MemorySeries::new(4);
        for i in 0..10 {
            s.push(i as f64, i as f64 * 0.5, i as f64 * 0.7);
            assert_eq!(s.times.len(), s.mem_gb.len());
            assert_eq!(s.times.len(), s.vms_gb.len());
            assert!(s.len() <= 4);
        }
    }

    #[test]
    fn evicts_oldest_first() {
        let mut s = MemorySeries::new(3);
        for i in 0..5 {
            s.push(i as f64, i as f64, i as f64);
        }
        let (t, m, v) = s.window(f64::INFINITY);
        assert_eq!(t, vec![2.0, 3.0, 4.0]);
        assert_eq!(m, vec![2.0, 3.0, 4.0]);
        assert_eq!(v, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn window_filters_by_lookback() {
        let mut s = MemorySeries::new(100);
        for i in 0..80 {
            s.push(i as f64, 1.0, 2.0);
        }
        let (t, m, v) = s.window(60.0);
        // latest = 79, cutoff = 19, inclusive
        assert_eq!(t.first().copied(), Some(19.0));
        assert_eq!(t.last().copied(), Some(79.0));
        assert_eq!(t.len(), 61);
        assert_eq!(m.len(), 61);
        assert_eq!(v.len(), 61);
    }

    #[test]
    fn empty_store_gives_empty_window() {
        let s = MemorySeries::new(8);
        let (t, m, v) = s.window(60.0);
        assert!(t.is_empty() && m.is_empty() && v.is_empty());
    }
}
