use async_trait::async_trait;

use super::prices_model::PriceBar;
use crate::errors::Result;

/// Storage interface for daily price bars.
///
/// Bars are keyed on `(symbol, date)`; at most one bar exists per key.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Insert or overwrite `bars` as one unit.
    ///
    /// An existing bar with the same `(symbol, date)` has its OHLCV fields
    /// replaced in place. Duplicate keys within one call resolve to the last
    /// bar in call order. An empty slice is a no-op.
    ///
    /// Returns the number of bars written.
    async fn upsert_bars(&self, bars: &[PriceBar]) -> Result<usize>;

    /// All bars for `symbol`, ascending by date.
    fn bars_for_symbol(&self, symbol: &str) -> Result<Vec<PriceBar>>;

    /// Total number of bars in the store.
    fn count_bars(&self) -> Result<i64>;
}
