use lushfin_monitor::error::FetchErrorKind;
use lushfin_monitor::event::AppEvent;
use lushfin_monitor::model::snapshot::Snapshot;
use lushfin_monitor::ui::AppState;

fn snapshot(symbol: &str, price: f64, indicator: Option<f64>) -> Snapshot {
    Snapshot {
        symbol: symbol.to_string(),
        price,
        indicator,
        observed_at: 1_700_000_000,
    }
}

#[test]
/// A successful cycle updates the monitor state, bumps the counter, and
/// clears any previous error.
fn snapshot_event_updates_monitor_state() {
    let mut state = AppState::new("http://127.0.0.1:9999");
    state.last_error = Some("stale".to_string());

    state.apply(AppEvent::Snapshot(snapshot("BTC/USDT", 65000.0, Some(72.5))));

    assert_eq!(state.fetch_count, 1);
    assert!(state.last_error.is_none());
    assert_eq!(state.monitor.latest().unwrap().symbol, "BTC/USDT");
    assert_eq!(state.monitor.history().len(), 1);
}

#[test]
/// A failed cycle leaves the accumulated state exactly as it
/// was — only presentation counters and the log change.
fn fetch_failure_retains_prior_state() {
    let mut state = AppState::new("http://127.0.0.1:9999");
    state.apply(AppEvent::Snapshot(snapshot("BTC/USDT", 65000.0, Some(60.0))));
    let latest_before = state.monitor.latest().cloned();
    let history_before = state.monitor.history().to_vec();

    state.apply(AppEvent::FetchFailed {
        kind: FetchErrorKind::HttpStatus,
        message: "unexpected HTTP status: 500 Internal Server Error".to_string(),
    });

    assert_eq!(state.monitor.latest().cloned(), latest_before);
    assert_eq!(state.monitor.history(), history_before.as_slice());
    assert_eq!(state.failure_count, 1);
    assert!(state.last_error.is_some());
}

#[test]
/// A later successful cycle resumes from the retained state.
fn success_after_failure_resumes_from_prior_state() {
    let mut state = AppState::new("http://127.0.0.1:9999");
    state.apply(AppEvent::Snapshot(snapshot("BTC/USDT", 65000.0, Some(60.0))));
    state.apply(AppEvent::FetchFailed {
        kind: FetchErrorKind::Transport,
        message: "transport error: connection refused".to_string(),
    });
    state.apply(AppEvent::Snapshot(snapshot("BTC/USDT", 65100.0, Some(61.0))));

    assert_eq!(state.monitor.history().len(), 2);
    assert!((state.monitor.latest().unwrap().price - 65100.0).abs() < f64::EPSILON);
    assert!(state.last_error.is_none());
}

#[test]
fn skipped_tick_is_counted_and_logged() {
    let mut state = AppState::new("http://127.0.0.1:9999");
    state.apply(AppEvent::PollSkipped);

    assert_eq!(state.skipped_count, 1);
    assert!(state
        .log_messages
        .iter()
        .any(|m| m.contains("skipped")));
}

#[test]
fn log_buffer_is_bounded() {
    let mut state = AppState::new("http://127.0.0.1:9999");
    for i in 0..500 {
        state.push_log(format!("line {}", i));
    }
    assert!(state.log_messages.len() <= 200);
    // Oldest lines are the ones evicted.
    assert_eq!(state.log_messages.last().unwrap(), "line 499");
}
