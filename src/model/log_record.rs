use serde::{Deserialize, Serialize};

/// The two logged metric streams: "mem" is physical memory used, "vms" is
/// physical plus swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    #[serde(rename = "mem")]
    Mem,
    #[serde(rename = "vms")]
    Vms,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Mem => "mem",
            MetricKind::Vms => "vms",
        }
    }
}

/// One persisted sample. `kind` is always written; it is optional on read so
/// that old export files whose records carry no "type" field still parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MetricKind>,
    pub value: f64,
}
