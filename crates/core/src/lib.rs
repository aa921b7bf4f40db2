//! Stockfetch Core - Domain entities, services, and traits.
//!
//! This crate contains the bulk fetch pipeline: the batch scheduler, the
//! progress tracker and the status observer. It is database-agnostic and
//! defines the storage traits implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod fetch;
pub mod prices;
pub mod progress;
pub mod status;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use stockfetch_market_data::FailureKind;
