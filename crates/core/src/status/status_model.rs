use std::fmt;

use crate::progress::RunStatus;

/// One observation of the run status row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusReport {
    Progress(RunStatus),
    /// The status row has not been created yet.
    NoData,
}

impl From<Option<RunStatus>> for StatusReport {
    fn from(status: Option<RunStatus>) -> Self {
        match status {
            Some(status) => StatusReport::Progress(status),
            None => StatusReport::NoData,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusReport::Progress(status) => {
                write!(
                    f,
                    "Progress: {} total, {} completed, {} failed",
                    status.total, status.completed, status.failed
                )?;
                if let Some(percent) = status.percent_done() {
                    write!(f, " ({:.1}%)", percent)?;
                }
                Ok(())
            }
            StatusReport::NoData => write!(f, "No status information available"),
        }
    }
}

/// Sink for observer output.
pub trait StatusReporter: Send + Sync {
    fn report(&self, report: &StatusReport);
}
