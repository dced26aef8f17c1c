use crate::model::snapshot::{format_time_label, HistoryPoint, Snapshot};

/// How many indicator observations the chart keeps.
pub const HISTORY_CAPACITY: usize = 20;

/// Accumulated result of the fetch-apply cycle: the latest successful
/// snapshot plus a bounded, arrival-ordered indicator history. Only invoked
/// on fetch success, so a failed cycle leaves the previous state untouched.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    latest: Option<Snapshot>,
    history: Vec<HistoryPoint>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one successful fetch into the state. A history point is appended
    /// only when the indicator is present (evicting from the front past
    /// capacity); the latest snapshot is replaced unconditionally so the
    /// price tile always reflects the newest fetch.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        if let Some(value) = snapshot.indicator {
            self.history.push(HistoryPoint {
                label: format_time_label(snapshot.observed_at),
                value,
            });
            if self.history.len() > HISTORY_CAPACITY {
                let excess = self.history.len() - HISTORY_CAPACITY;
                self.history.drain(..excess);
            }
        }
        self.latest = Some(snapshot);
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    pub fn history(&self) -> &[HistoryPoint] {
        &self.history
    }

    /// Series handed to the chart: the real history, or a single neutral
    /// point so the chart always has a baseline to draw.
    pub fn chart_points(&self) -> Vec<HistoryPoint> {
        if self.history.is_empty() {
            vec![HistoryPoint::placeholder()]
        } else {
            self.history.clone()
        }
    }
}
