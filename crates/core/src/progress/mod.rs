//! Run progress - the singleton status counters shared by fetch workers and
//! the status observer.

mod progress_model;
mod progress_tracker;
mod progress_traits;

pub use progress_model::{RunStatus, StatusDelta};
pub use progress_tracker::ProgressTracker;
pub use progress_traits::{RunStatusReader, RunStatusStore};
