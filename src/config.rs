use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rank_interval_ms: u64,
    pub sample_interval_ms: u64,
    pub window_secs: f64,
    pub series_capacity: usize,
    pub top_n: usize,
    pub mem_log_path: PathBuf,
    pub vms_log_path: PathBuf,
    /// 0 disables the periodic JSON-array export.
    pub export_interval_secs: u64,
    pub mem_export_path: PathBuf,
    pub vms_export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rank_interval_ms: 1000,
            sample_interval_ms: 50,
            window_secs: 60.0,
            series_capacity: 2048,
            top_n: 512,
            mem_log_path: PathBuf::from("mem_log.jsonl"),
            vms_log_path: PathBuf::from("vms_log.jsonl"),
            export_interval_secs: 0,
            mem_export_path: PathBuf::from("mem_log.json"),
            vms_export_path: PathBuf::from("vms_log.json"),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = fs::read_to_string(&path) {
            serde_json::from_str(&data).unwrap_or_default()
        } else {
            Config::default()
        }
    }

    pub fn save(&self) {
        let path = config_path();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(data) = serde_json::to_string_pretty(self) {
            let _ = fs::write(&path, data);
        }
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("memwatch")
        .join("config.json")
}
