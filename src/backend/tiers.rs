//! Magnitude tiers for coloring process sizes in tables and legends.

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// One magnitude bucket. `upper_bound` is inclusive; `None` marks the
/// unbounded top tier.
#[derive(Debug, Clone, Copy)]
pub struct MagnitudeTier {
    pub upper_bound: Option<u64>,
    pub color: &'static str,
    pub label: &'static str,
}

/// The 11 tiers, bounds strictly increasing.
pub const TIERS: [MagnitudeTier; 11] = [
    MagnitudeTier { upper_bound: Some(MIB), color: "#ffffff", label: "0-1MB" },
    MagnitudeTier { upper_bound: Some(100 * MIB), color: "#e6f0ff", label: "1-100MB" },
    MagnitudeTier { upper_bound: Some(GIB), color: "#cce0ff", label: "100MB-1GB" },
    MagnitudeTier { upper_bound: Some(3 * GIB), color: "#b3d1ff", label: "1-3GB" },
    MagnitudeTier { upper_bound: Some(8 * GIB), color: "#d0ffd0", label: "3-8GB" },
    MagnitudeTier { upper_bound: Some(16 * GIB), color: "#b0ffb0", label: "8-16GB" },
    MagnitudeTier { upper_bound: Some(64 * GIB), color: "#ffffcc", label: "16-64GB" },
    MagnitudeTier { upper_bound: Some(128 * GIB), color: "#ffff99", label: "64-128GB" },
    MagnitudeTier { upper_bound: Some(256 * GIB), color: "#ffcccc", label: "128-256GB" },
    MagnitudeTier { upper_bound: Some(1024 * GIB), color: "#ff9999", label: "256-1024GB" },
    MagnitudeTier { upper_bound: None, color: "#e6ccff", label: ">1024GB" },
];

/// Map a byte count to its tier index (0..=10). Total over all inputs: the
/// first tier whose bound covers the value wins, anything past the largest
/// bound lands in the top tier.
pub fn tier_index(size_bytes: u64) -> usize {
    for (idx, tier) in TIERS.iter().enumerate() {
        match tier.upper_bound {
            Some(bound) if size_bytes <= bound => return idx,
            Some(_) => {}
            None => return idx,
        }
    }
    TIERS.len() - 1
}

/// Convenience for legend rendering.
pub fn tier_for(size_bytes: u64) -> &'static MagnitudeTier {
    &TIERS[tier_index(size_bytes)]
}
