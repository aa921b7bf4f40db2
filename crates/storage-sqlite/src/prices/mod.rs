//! SQLite storage implementation for daily price bars.

mod model;
mod repository;

pub use model::{NewPriceBarDB, PriceBarDB};
pub use repository::PriceRepository;

// Re-export trait from core for convenience
pub use stockfetch_core::prices::PriceStore;
