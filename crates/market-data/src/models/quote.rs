use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One trading day of market data as returned by a provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Timestamp of the bar as reported by the provider
    pub timestamp: DateTime<Utc>,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    /// Trading volume (shares)
    pub volume: u64,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl Quote {
    /// Create a full OHLCV quote
    pub fn ohlcv(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            source: source.into(),
        }
    }
}
