use serde::Deserialize;

use crate::error::FetchError;
use crate::model::snapshot::Snapshot;

/// Require a field to be present while still accepting an explicit null.
/// Plain `Option` fields treat a missing key as null, which would let a
/// schema violation slip through as a valid snapshot.
fn nullable_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}

/// Raw `/stats` response body:
/// `{ symbol: string, price: number, rsi: number | null, timestamp: seconds }`
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub symbol: String,
    pub price: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub rsi: Option<f64>,
    pub timestamp: u64,
}

impl StatsResponse {
    /// Validate ranges and produce the immutable domain snapshot. A field out
    /// of contract is a parse failure, never a partially populated snapshot.
    pub fn into_snapshot(self) -> Result<Snapshot, FetchError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(FetchError::Parse(format!(
                "price out of range: {}",
                self.price
            )));
        }
        if let Some(rsi) = self.rsi {
            if !rsi.is_finite() || !(0.0..=100.0).contains(&rsi) {
                return Err(FetchError::Parse(format!("rsi out of range: {}", rsi)));
            }
        }
        Ok(Snapshot {
            symbol: self.symbol,
            price: self.price,
            indicator: self.rsi,
            observed_at: self.timestamp,
        })
    }
}
