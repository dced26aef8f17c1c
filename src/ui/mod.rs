pub mod chart;
pub mod dashboard;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::event::AppEvent;
use crate::monitor::MonitorState;

use chart::IndicatorChart;
use dashboard::{KeybindBar, LogPanel, PriceTile, StatusBar};

const MAX_LOG_MESSAGES: usize = 200;

/// Presentation state: the core monitor state plus counters and a bounded
/// log buffer. Mutated only by `apply`, on the TUI loop.
pub struct AppState {
    pub endpoint: String,
    pub monitor: MonitorState,
    pub fetch_count: u64,
    pub failure_count: u64,
    pub skipped_count: u64,
    pub last_error: Option<String>,
    pub polling: bool,
    pub log_messages: Vec<String>,
}

impl AppState {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            monitor: MonitorState::new(),
            fetch_count: 0,
            failure_count: 0,
            skipped_count: 0,
            last_error: None,
            polling: true,
            log_messages: Vec::new(),
        }
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Snapshot(snapshot) => {
                self.fetch_count += 1;
                self.last_error = None;
                let reading = snapshot
                    .indicator
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "---".to_string());
                self.push_log(format!(
                    "{} @ {:.2} (rsi {})",
                    snapshot.symbol, snapshot.price, reading
                ));
                self.monitor.apply_snapshot(snapshot);
            }
            AppEvent::FetchFailed { kind, message } => {
                self.failure_count += 1;
                self.last_error = Some(message.clone());
                self.push_log(format!("[ERR] fetch failed ({:?}): {}", kind, message));
            }
            AppEvent::PollSkipped => {
                self.skipped_count += 1;
                self.push_log("tick skipped: previous fetch still in flight".to_string());
            }
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(5), // price tile
            Constraint::Min(10),   // indicator chart
            Constraint::Length(6), // log
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            endpoint: &state.endpoint,
            polling: state.polling,
            fetch_count: state.fetch_count,
            failure_count: state.failure_count,
        },
        outer[0],
    );

    frame.render_widget(PriceTile::new(state.monitor.latest()), outer[1]);

    let points = state.monitor.chart_points();
    frame.render_widget(IndicatorChart::new(&points), outer[2]);

    frame.render_widget(LogPanel::new(&state.log_messages), outer[3]);

    frame.render_widget(KeybindBar, outer[4]);
}
