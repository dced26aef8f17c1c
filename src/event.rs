use crate::error::FetchErrorKind;
use crate::model::snapshot::Snapshot;

/// Events delivered to the TUI loop, which is the only place state mutates.
/// Fetch results arrive in completion order, not issue order.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A fetch cycle completed successfully.
    Snapshot(Snapshot),
    /// A fetch cycle failed; prior state is retained untouched.
    FetchFailed {
        kind: FetchErrorKind,
        message: String,
    },
    /// A scheduled tick was dropped because the previous fetch was still in
    /// flight (skip overlap policy).
    PollSkipped,
}
