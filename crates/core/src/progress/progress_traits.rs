use async_trait::async_trait;

use super::progress_model::{RunStatus, StatusDelta};
use crate::errors::Result;

/// Read access to the run status row.
pub trait RunStatusReader: Send + Sync {
    /// Current snapshot, or `None` if the row does not exist yet.
    fn read_run_status(&self) -> Result<Option<RunStatus>>;
}

/// Storage interface for the singleton run status row.
///
/// The store is the only home of the counters: implementations must not
/// cache them in memory, and concurrent `increment_status` calls must
/// compose as true sums.
#[async_trait]
pub trait RunStatusStore: RunStatusReader {
    /// Create the status row with all counters at zero if it does not exist.
    ///
    /// An existing row is left untouched.
    async fn ensure_run_status(&self) -> Result<RunStatus>;

    /// Atomically add `delta` to the status row and commit.
    ///
    /// Fails with `DatabaseError::NotFound` if `ensure_run_status` was never called.
    async fn increment_status(&self, delta: StatusDelta) -> Result<RunStatus>;
}
