//! Market data provider trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for daily price history providers.
///
/// Implement this trait to add support for a new market data source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockfetch_market_data::{MarketDataError, MarketDataProvider, Quote};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_historical_quotes(
///         &self,
///         symbol: &str,
///         start: DateTime<Utc>,
///         end: DateTime<Utc>,
///     ) -> Result<Vec<Quote>, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// recorded as the quote source.
    fn id(&self) -> &'static str;

    /// Fetch daily quotes for `symbol` from `start` (inclusive) to `end` (exclusive).
    ///
    /// Quotes are ordered by timestamp ascending. A symbol with no trading
    /// days in the range yields an empty vector, not an error.
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
