use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, error, info, warn};

use stockfetch_market_data::{MarketDataProvider, SymbolCatalog};

use super::fetch_model::{
    bars_from_quotes, partition_batches, BatchTally, DateRange, FetchRunSummary, SymbolOutcome,
};
use super::fetch_traits::FetchServiceTrait;
use crate::constants::DEFAULT_BATCH_SIZE;
use crate::errors::{Error, Result};
use crate::prices::PriceStore;
use crate::progress::ProgressTracker;

/// Drives a full-universe fetch: enumerate, then fetch batch by batch.
pub struct FetchService {
    catalog: Arc<dyn SymbolCatalog>,
    provider: Arc<dyn MarketDataProvider>,
    price_store: Arc<dyn PriceStore>,
    progress: ProgressTracker,
    batch_size: usize,
}

impl FetchService {
    pub fn new(
        catalog: Arc<dyn SymbolCatalog>,
        provider: Arc<dyn MarketDataProvider>,
        price_store: Arc<dyn PriceStore>,
        progress: ProgressTracker,
    ) -> Self {
        Self {
            catalog,
            provider,
            price_store,
            progress,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the batch size. Values below one are clamped to one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Fetch, convert and persist one symbol. Returns the number of bars written.
    async fn fetch_and_store(&self, symbol: &str, range: &DateRange) -> Result<usize> {
        let quotes = self
            .provider
            .get_historical_quotes(symbol, range.start_utc(), range.end_utc_exclusive())
            .await?;

        let bars = bars_from_quotes(symbol, &quotes, range)?;
        if bars.is_empty() {
            debug!("No trading days in range for {}", symbol);
            return Ok(0);
        }

        self.price_store.upsert_bars(&bars).await?;
        Ok(bars.len())
    }

    /// Run one symbol to a terminal outcome and count it.
    ///
    /// Fetch and persistence errors become `SymbolOutcome::Failed`. Only a
    /// failed counter update is returned as an error.
    pub(super) async fn process_symbol(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<SymbolOutcome> {
        match self.fetch_and_store(symbol, range).await {
            Ok(bars) => {
                self.progress.record_completed().await?;
                Ok(SymbolOutcome::Completed {
                    symbol: symbol.to_string(),
                    bars,
                })
            }
            Err(e) => {
                let kind = e.failure_kind();
                warn!("Failed to fetch {} ({}): {}", symbol, kind, e);
                self.progress.record_failed().await?;
                Ok(SymbolOutcome::Failed {
                    symbol: symbol.to_string(),
                    kind,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Run every symbol of `batch` concurrently and wait for all of them.
    async fn run_batch(&self, batch: &[String], range: &DateRange) -> Result<BatchTally> {
        let tasks = batch
            .iter()
            .map(|symbol| self.process_symbol(symbol, range));
        let results = join_all(tasks).await;

        let mut tally = BatchTally::default();
        let mut status_error: Option<Error> = None;
        for result in results {
            match result {
                Ok(outcome) => tally.record(&outcome),
                Err(e) => {
                    if status_error.is_none() {
                        status_error = Some(e);
                    }
                }
            }
        }

        match status_error {
            Some(e) => Err(e),
            None => Ok(tally),
        }
    }
}

#[async_trait]
impl FetchServiceTrait for FetchService {
    async fn run_full_fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<FetchRunSummary> {
        let range = DateRange::new(start, end)?;
        self.progress.initialize().await?;

        let symbols = match self.catalog.fetch_all_symbols().await {
            Ok(symbols) => symbols,
            Err(e) => {
                error!("Failed to enumerate symbol universe: {}", e);
                return Err(e.into());
            }
        };

        self.progress.record_universe(symbols.len()).await?;

        let batches = partition_batches(&symbols, self.batch_size);
        info!(
            "Starting fetch for {} to {}: {} symbols in {} batches",
            range.start,
            range.end,
            symbols.len(),
            batches.len()
        );

        let mut summary = FetchRunSummary {
            total: symbols.len(),
            ..Default::default()
        };

        for (index, batch) in batches.iter().enumerate() {
            debug!(
                "Batch {}/{}: starting {} symbols",
                index + 1,
                batches.len(),
                batch.len()
            );

            let tally = self.run_batch(batch, &range).await.map_err(|e| {
                error!("Batch {} aborted: status update failed: {}", index + 1, e);
                e
            })?;

            info!(
                "Batch {}/{} finished: {} completed, {} failed",
                index + 1,
                batches.len(),
                tally.completed,
                tally.failed
            );
            summary.add_batch(tally);
        }

        info!(
            "Fetch finished: {} total, {} completed, {} failed, {} bars in {} batches",
            summary.total, summary.completed, summary.failed, summary.bars, summary.batches
        );

        Ok(summary)
    }
}
