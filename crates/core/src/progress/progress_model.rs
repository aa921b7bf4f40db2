use serde::{Deserialize, Serialize};

/// Aggregate progress counters across every run against one store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatus {
    pub total: i64,
    pub completed: i64,
    pub failed: i64,
}

impl RunStatus {
    /// Symbols that reached a terminal state.
    pub fn finished(&self) -> i64 {
        self.completed + self.failed
    }

    /// Share of `total` that reached a terminal state, in percent.
    ///
    /// `None` while `total` is zero.
    pub fn percent_done(&self) -> Option<f64> {
        if self.total <= 0 {
            return None;
        }
        Some(self.finished() as f64 * 100.0 / self.total as f64)
    }

    /// True once every counted symbol is either completed or failed.
    pub fn is_drained(&self) -> bool {
        self.finished() == self.total
    }
}

/// Amounts to add to each counter in one atomic update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusDelta {
    pub total: i64,
    pub completed: i64,
    pub failed: i64,
}

impl StatusDelta {
    pub const COMPLETED: StatusDelta = StatusDelta {
        total: 0,
        completed: 1,
        failed: 0,
    };

    pub const FAILED: StatusDelta = StatusDelta {
        total: 0,
        completed: 0,
        failed: 1,
    };

    pub fn new(total: i64, completed: i64, failed: i64) -> Self {
        Self {
            total,
            completed,
            failed,
        }
    }

    pub fn total(total: i64) -> Self {
        Self::new(total, 0, 0)
    }

    /// Apply this delta to `status`.
    pub fn apply(&self, status: RunStatus) -> RunStatus {
        RunStatus {
            total: status.total + self.total,
            completed: status.completed + self.completed,
            failed: status.failed + self.failed,
        }
    }
}
