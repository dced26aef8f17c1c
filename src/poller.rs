use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::event::AppEvent;
use crate::stats::rest::StatsRestClient;

/// What to do when the interval fires while the previous fetch is still in
/// flight. `Skip` drops the tick and reports it; `Allow` lets fetches overlap,
/// with results applied in completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    Skip,
    Allow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerPhase {
    Idle,
    Running,
    Stopped,
}

/// Owns the repeating fetch trigger: one cycle immediately on start, then one
/// per period until stopped. Each cycle emits exactly one event on the shared
/// channel; the receiving loop applies them in arrival order.
pub struct Poller {
    client: Arc<StatsRestClient>,
    period: Duration,
    overlap: OverlapPolicy,
    events: mpsc::Sender<AppEvent>,
    phase: PollerPhase,
    stopped: Arc<AtomicBool>,
    in_flight: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(
        client: Arc<StatsRestClient>,
        period: Duration,
        overlap: OverlapPolicy,
        events: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            client,
            period,
            overlap,
            events,
            phase: PollerPhase::Idle,
            stopped: Arc::new(AtomicBool::new(false)),
            in_flight: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn phase(&self) -> PollerPhase {
        self.phase
    }

    /// Idle -> Running. Calling again while Running (or after a stop) is a
    /// no-op: a repeated call must never create a second trigger stream.
    pub fn start(&mut self) {
        if self.phase != PollerPhase::Idle {
            tracing::warn!(phase = ?self.phase, "poller start ignored");
            return;
        }
        self.phase = PollerPhase::Running;

        let client = self.client.clone();
        let events = self.events.clone();
        let stopped = self.stopped.clone();
        let in_flight = self.in_flight.clone();
        let overlap = self.overlap;
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // The first tick completes immediately: the startup fetch is
                // not gated by the interval.
                ticker.tick().await;
                if stopped.load(Ordering::SeqCst) {
                    break;
                }
                if overlap == OverlapPolicy::Skip && in_flight.load(Ordering::SeqCst) {
                    tracing::debug!("previous fetch still in flight, skipping tick");
                    let _ = events.send(AppEvent::PollSkipped).await;
                    continue;
                }
                in_flight.store(true, Ordering::SeqCst);

                let client = client.clone();
                let events = events.clone();
                let stopped = stopped.clone();
                let in_flight = in_flight.clone();
                tokio::spawn(async move {
                    let outcome = client.fetch_snapshot().await;
                    in_flight.store(false, Ordering::SeqCst);
                    // A cycle that outlives stop() must not mutate state.
                    if stopped.load(Ordering::SeqCst) {
                        return;
                    }
                    let event = match outcome {
                        Ok(snapshot) => {
                            tracing::debug!(
                                symbol = %snapshot.symbol,
                                price = snapshot.price,
                                "snapshot fetched"
                            );
                            AppEvent::Snapshot(snapshot)
                        }
                        Err(e) => {
                            tracing::warn!(kind = ?e.kind(), error = %e, "stats fetch failed");
                            AppEvent::FetchFailed {
                                kind: e.kind(),
                                message: e.to_string(),
                            }
                        }
                    };
                    let _ = events.send(event).await;
                });
            }
        }));
    }

    /// Running -> Stopped. Cancels future ticks. An in-flight fetch is left
    /// to complete but its result is discarded. Idempotent; a no-op from
    /// Idle.
    pub fn stop(&mut self) {
        if self.phase != PollerPhase::Running {
            return;
        }
        self.phase = PollerPhase::Stopped;
        self.stopped.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
