use std::sync::Arc;

use log::debug;

use super::progress_model::{RunStatus, StatusDelta};
use super::progress_traits::{RunStatusReader, RunStatusStore};
use crate::errors::Result;

/// Counter updates against the durable run status row.
///
/// Holds no counters of its own. Every call is one committed store update.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn RunStatusStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn RunStatusStore>) -> Self {
        Self { store }
    }

    /// Make sure the status row exists. Call before any other update.
    pub async fn initialize(&self) -> Result<RunStatus> {
        self.store.ensure_run_status().await
    }

    /// Add the universe size of a run to `total`.
    pub async fn record_universe(&self, symbol_count: usize) -> Result<RunStatus> {
        let status = self
            .store
            .increment_status(StatusDelta::total(symbol_count as i64))
            .await?;
        debug!(
            "Recorded universe of {} symbols (total now {})",
            symbol_count, status.total
        );
        Ok(status)
    }

    pub async fn record_completed(&self) -> Result<RunStatus> {
        self.store.increment_status(StatusDelta::COMPLETED).await
    }

    pub async fn record_failed(&self) -> Result<RunStatus> {
        self.store.increment_status(StatusDelta::FAILED).await
    }

    pub fn snapshot(&self) -> Result<Option<RunStatus>> {
        self.store.read_run_status()
    }
}
