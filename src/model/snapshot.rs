use chrono::{Local, TimeZone};

/// One fetched market observation. Created fresh on every successful fetch
/// and never mutated; the next successful fetch supersedes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub symbol: String,
    pub price: f64,
    /// RSI reading in [0, 100]; absent while upstream lacks warm-up data.
    pub indicator: Option<f64>,
    /// Seconds since epoch.
    pub observed_at: u64,
}

/// A display-ready chart sample derived from a snapshot's indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub label: String,
    pub value: f64,
}

impl HistoryPoint {
    /// Neutral baseline rendered while no real history exists yet.
    pub fn placeholder() -> Self {
        Self {
            label: "N/A".to_string(),
            value: 50.0,
        }
    }
}

/// Format an epoch-seconds timestamp as a local HH:MM axis label.
pub fn format_time_label(observed_at: u64) -> String {
    match Local.timestamp_opt(observed_at as i64, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M").to_string(),
        _ => "N/A".to_string(),
    }
}
