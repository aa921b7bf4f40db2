use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use stockfetch_market_data::Quote;

use crate::errors::{Result, ValidationError};

/// One day's OHLCV record for one symbol.
///
/// `date` is always midnight UTC of the trading day; `(symbol, date)` is the
/// natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub symbol: String,
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl PriceBar {
    /// Build a bar for `symbol` from a provider quote, truncating its
    /// timestamp to the trading day.
    pub fn from_quote(symbol: &str, quote: &Quote) -> Result<Self> {
        let volume = i64::try_from(quote.volume).map_err(|_| {
            ValidationError::InvalidInput(format!(
                "Volume {} for {} overflows a signed 64-bit integer",
                quote.volume, symbol
            ))
        })?;

        Ok(Self {
            symbol: symbol.to_string(),
            date: normalize_to_day(quote.timestamp),
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume,
        })
    }
}

/// Midnight UTC of the calendar day containing `ts`.
pub fn normalize_to_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}
