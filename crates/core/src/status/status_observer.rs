use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::{interval, MissedTickBehavior};

use super::status_model::{StatusReport, StatusReporter};
use crate::constants::STATUS_POLL_INTERVAL_SECS;
use crate::errors::Result;
use crate::progress::RunStatusReader;

/// Periodically reads the run status row and hands each snapshot to a reporter.
///
/// Never writes. Concurrent fetch runs may update the row between two reads.
pub struct StatusObserver {
    store: Arc<dyn RunStatusReader>,
    interval: Duration,
}

impl StatusObserver {
    pub fn new(store: Arc<dyn RunStatusReader>) -> Self {
        Self {
            store,
            interval: Duration::from_secs(STATUS_POLL_INTERVAL_SECS),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read one snapshot.
    pub fn poll_once(&self) -> Result<StatusReport> {
        Ok(StatusReport::from(self.store.read_run_status()?))
    }

    /// Poll at the configured interval, starting immediately.
    ///
    /// Runs until `max_polls` reads were attempted, or forever when `None`.
    /// Read failures are logged and the loop keeps going.
    pub async fn run(&self, reporter: &dyn StatusReporter, max_polls: Option<usize>) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut polls = 0usize;
        loop {
            if max_polls.is_some_and(|max| polls >= max) {
                debug!("Status observer stopping after {} polls", polls);
                return;
            }
            ticker.tick().await;
            polls += 1;

            match self.poll_once() {
                Ok(report) => reporter.report(&report),
                Err(e) => warn!("Failed to read run status: {}", e),
            }
        }
    }
}
