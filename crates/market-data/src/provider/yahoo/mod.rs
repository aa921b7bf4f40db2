//! Yahoo Finance market data provider.
//!
//! Fetches daily OHLCV history for exchange-listed securities (e.g. AAPL, MSFT)
//! through the Yahoo Finance chart API.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> Result<OffsetDateTime, MarketDataError> {
        OffsetDateTime::from_unix_timestamp(dt.timestamp()).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Date {} out of range: {}", dt, e),
            }
        })
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(yahoo_quote: &yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp = i64::try_from(yahoo_quote.timestamp)
            .ok()
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .ok_or_else(|| MarketDataError::Parse {
                source_name: PROVIDER_ID.to_string(),
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let volume = u64::try_from(yahoo_quote.volume).map_err(|_| MarketDataError::Parse {
            source_name: PROVIDER_ID.to_string(),
            message: format!("Invalid volume at {}", timestamp),
        })?;

        let quote = Quote::ohlcv(
            timestamp,
            yahoo_quote.open,
            yahoo_quote.high,
            yahoo_quote.low,
            yahoo_quote.close,
            volume,
            PROVIDER_ID,
        );
        validate_prices(&quote)?;
        Ok(quote)
    }
}

/// Reject bars whose prices are NaN or infinite.
fn validate_prices(quote: &Quote) -> Result<(), MarketDataError> {
    let prices = [quote.open, quote.high, quote.low, quote.close];
    if prices.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(MarketDataError::Parse {
            source_name: PROVIDER_ID.to_string(),
            message: format!("Non-finite price in bar at {}", quote.timestamp),
        })
    }
}

fn map_yahoo_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
    match e {
        yahoo::YahooError::NoResult => MarketDataError::SymbolNotFound(symbol.to_string()),
        // Yahoo answered, but the body did not decode into a chart
        yahoo::YahooError::DeserializeFailed(..)
        | yahoo::YahooError::DeserializeFailedDebug(..)
        | yahoo::YahooError::DataInconsistency => MarketDataError::Parse {
            source_name: PROVIDER_ID.to_string(),
            message: format!("{} for {}", e, symbol),
        },
        _ => MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        },
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!(
            "Fetching historical quotes for {} from {} to {} from Yahoo",
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let start_time = Self::chrono_to_offset_datetime(start)?;
        let end_time = Self::chrono_to_offset_datetime(end)?;

        let response = match self
            .connector
            .get_quote_history(symbol, start_time, end_time)
            .await
        {
            Ok(response) => response,
            Err(yahoo::YahooError::NoQuotes) => return Ok(Vec::new()),
            Err(e) => return Err(map_yahoo_error(symbol, e)),
        };

        match response.quotes() {
            Ok(yahoo_quotes) => yahoo_quotes
                .iter()
                .map(Self::yahoo_quote_to_quote)
                .collect(),
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical quotes returned for '{}' between {} and {}",
                    symbol,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
                Ok(Vec::new())
            }
            Err(e) => Err(map_yahoo_error(symbol, e)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
