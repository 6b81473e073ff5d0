mod logger;
mod ranker;
mod sampler;
mod series;
mod smooth;
mod system;
pub mod tiers;

pub use logger::MemoryLog;
pub use ranker::{rank, TOP_N};
pub use sampler::Sampler;
pub use series::{MemorySeries, MAX_POINTS};
pub use smooth::{smooth, step_line};
pub use system::{ProcProbe, SystemProbe};
