use async_trait::async_trait;
use chrono::NaiveDate;

use super::fetch_model::FetchRunSummary;
use crate::errors::Result;

#[async_trait]
pub trait FetchServiceTrait: Send + Sync {
    /// Fetch and persist daily history for the whole symbol universe.
    ///
    /// Both dates are inclusive. Fails only when the universe cannot be
    /// enumerated or the status counters cannot be updated; per-symbol
    /// failures are counted, never returned.
    async fn run_full_fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<FetchRunSummary>;
}
