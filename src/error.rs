use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one snapshot fetch cycle. The poll loop never terminates on
/// these; the next scheduled tick is the retry.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    HttpStatus(StatusCode),

    #[error("malformed stats payload: {0}")]
    Parse(String),
}

/// Tag for branching on (and asserting against) a fetch failure without
/// holding the underlying error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    HttpStatus,
    Parse,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::HttpStatus(_) => FetchErrorKind::HttpStatus,
            FetchError::Parse(_) => FetchErrorKind::Parse,
        }
    }
}
