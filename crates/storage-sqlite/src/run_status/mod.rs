//! SQLite storage implementation for the run status row.

mod model;
mod repository;

pub use model::RunStatusDB;
pub use repository::{RunStatusRepository, RunStatusView, RUN_STATUS_ID};

// Re-export traits from core for convenience
pub use stockfetch_core::progress::{RunStatusReader, RunStatusStore};
