//! Bulk fetch module - batch scheduling of per-symbol history fetches.
//!
//! ```text
//! SymbolCatalog ──► FetchService ──► batches of DEFAULT_BATCH_SIZE
//!                        │                 │
//!                        │                 ├─► MarketDataProvider (concurrent per symbol)
//!                        │                 ├─► PriceStore::upsert_bars
//!                        └─────────────────┴─► ProgressTracker (completed / failed)
//! ```

mod fetch_model;
mod fetch_service;
mod fetch_traits;


pub use fetch_model::{partition_batches, BatchTally, DateRange, FetchRunSummary, SymbolOutcome};
pub use fetch_service::FetchService;
pub use fetch_traits::FetchServiceTrait;
