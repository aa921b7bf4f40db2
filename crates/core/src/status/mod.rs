//! Status observer - read-only polling of the run status row.

mod status_model;
mod status_observer;

pub use status_model::{StatusReport, StatusReporter};
pub use status_observer::StatusObserver;
