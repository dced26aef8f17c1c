use anyhow::{bail, Context, Result};
use url::Url;

use crate::error::FetchError;
use crate::model::snapshot::Snapshot;

use super::types::StatsResponse;

/// Thin client for the market statistics service. One endpoint, no auth.
pub struct StatsRestClient {
    http: reqwest::Client,
    stats_url: String,
}

impl StatsRestClient {
    /// Build a client for `{base_url}/stats`. The base must be an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let stats_url = format!("{}/stats", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&stats_url)
            .with_context(|| format!("invalid stats base URL '{}'", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "invalid stats base URL '{}': expected an http or https scheme",
                base_url
            );
        }
        Ok(Self {
            http: reqwest::Client::new(),
            stats_url,
        })
    }

    pub fn stats_url(&self) -> &str {
        &self.stats_url
    }

    /// One fetch cycle: GET the stats endpoint and map the body into a
    /// validated snapshot. Every failure mode is a tagged `FetchError`; the
    /// caller owns retry policy.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let resp = self
            .http
            .get(&self.stats_url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let body = resp.text().await.map_err(FetchError::Transport)?;
        let raw: StatsResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        raw.into_snapshot()
    }
}
