use lushfin_monitor::model::snapshot::{format_time_label, HistoryPoint, Snapshot};
use lushfin_monitor::monitor::{MonitorState, HISTORY_CAPACITY};

fn snapshot(symbol: &str, price: f64, indicator: Option<f64>, observed_at: u64) -> Snapshot {
    Snapshot {
        symbol: symbol.to_string(),
        price,
        indicator,
        observed_at,
    }
}

#[test]
/// The very first snapshot populates both the latest-snapshot
/// reference and a single history point with a formatted time label.
fn first_snapshot_populates_state() {
    let mut state = MonitorState::new();
    state.apply_snapshot(snapshot("BTC/USDT", 65000.0, Some(72.5), 1_700_000_000));

    let latest = state.latest().expect("latest snapshot");
    assert!((latest.price - 65000.0).abs() < f64::EPSILON);
    assert_eq!(
        state.history(),
        &[HistoryPoint {
            label: format_time_label(1_700_000_000),
            value: 72.5,
        }]
    );
}

#[test]
/// 21 indicator-bearing snapshots with values 1..=21 leave a
/// 20-point history holding 2..=21 in arrival order — exactly the oldest
/// point is evicted.
fn twenty_first_point_evicts_only_the_oldest() {
    let mut state = MonitorState::new();
    for i in 1..=21u64 {
        state.apply_snapshot(snapshot("BTC/USDT", 65000.0, Some(i as f64), 1_700_000_000 + i));
    }

    assert_eq!(state.history().len(), HISTORY_CAPACITY);
    let values: Vec<f64> = state.history().iter().map(|p| p.value).collect();
    let expected: Vec<f64> = (2..=21).map(|i| i as f64).collect();
    assert_eq!(values, expected);
}

#[test]
/// A null indicator leaves history untouched but still
/// replaces the latest snapshot (the tile must show the newest price).
fn null_indicator_updates_latest_only() {
    let mut state = MonitorState::new();
    state.apply_snapshot(snapshot("BTC/USDT", 65000.0, Some(40.0), 1_700_000_000));
    let before: Vec<HistoryPoint> = state.history().to_vec();

    state.apply_snapshot(snapshot("ETH/USDT", 3452.12, None, 1_700_000_030));

    assert_eq!(state.history(), before.as_slice());
    assert_eq!(state.latest().unwrap().symbol, "ETH/USDT");
}

#[test]
/// The capacity bound holds after every single apply, not just at the end.
fn history_bounded_after_every_apply() {
    let mut state = MonitorState::new();
    for i in 0..100u64 {
        // Alternate between present and absent indicators.
        let indicator = if i % 3 == 0 { None } else { Some((i % 100) as f64) };
        state.apply_snapshot(snapshot("BTC/USDT", 65000.0, indicator, 1_700_000_000 + i));
        assert!(state.history().len() <= HISTORY_CAPACITY);
    }
}

#[test]
/// History order follows arrival order, not the snapshots' own timestamps:
/// the accumulator never reorders by observed_at.
fn history_order_is_arrival_order() {
    let mut state = MonitorState::new();
    // Feed decreasing timestamps with increasing values.
    state.apply_snapshot(snapshot("BTC/USDT", 65000.0, Some(10.0), 1_700_000_300));
    state.apply_snapshot(snapshot("BTC/USDT", 65000.0, Some(20.0), 1_700_000_200));
    state.apply_snapshot(snapshot("BTC/USDT", 65000.0, Some(30.0), 1_700_000_100));

    let values: Vec<f64> = state.history().iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10.0, 20.0, 30.0]);
}

#[test]
/// Determinism: the same ordered snapshot sequence produces the same state.
fn replaying_a_sequence_is_deterministic() {
    let sequence: Vec<Snapshot> = (0..30u64)
        .map(|i| {
            snapshot(
                "BTC/USDT",
                65000.0 + i as f64,
                if i % 4 == 0 { None } else { Some(i as f64) },
                1_700_000_000 + 30 * i,
            )
        })
        .collect();

    let mut a = MonitorState::new();
    let mut b = MonitorState::new();
    for s in &sequence {
        a.apply_snapshot(s.clone());
    }
    for s in &sequence {
        b.apply_snapshot(s.clone());
    }

    assert_eq!(a.history(), b.history());
    assert_eq!(a.latest(), b.latest());
}

#[test]
/// With no history yet, the chart series is exactly one
/// neutral placeholder point so the chart always renders a baseline.
fn empty_history_yields_placeholder_series() {
    let state = MonitorState::new();
    let points = state.chart_points();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].label, "N/A");
    assert!((points[0].value - 50.0).abs() < f64::EPSILON);
}
