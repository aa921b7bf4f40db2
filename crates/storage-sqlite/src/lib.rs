//! SQLite storage implementation for Stockfetch.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the storage traits defined in `stockfetch-core` and contains:
//! - Database initialization and connection pooling
//! - Diesel migrations for the price and status tables
//! - The single writer actor every mutation goes through
//! - Repository implementations for price bars and the run status row
//!
//! # Architecture
//!
//! ```text
//!  FetchService                          StatusObserver
//!       │                                      │
//!       ▼                                      ▼
//!  PriceRepository ─┐   RunStatusRepository   RunStatusView
//!                   │     │                    │ reads (query_only pool)
//!          writes   ▼     ▼ writes             │
//!             WriteHandle (1 thread)           │
//!                   │                          ▼
//!                   └────────► SQLite (WAL) ◄──┘
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod prices;
pub mod run_status;

// Re-export database utilities
pub use db::{
    create_pool, create_read_only_pool, get_connection, init, run_migrations, spawn_writer,
    table_exists, DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use prices::PriceRepository;
pub use run_status::{RunStatusRepository, RunStatusView, RUN_STATUS_ID};

// Re-export from stockfetch-core for convenience
pub use stockfetch_core::errors::{DatabaseError, Error, Result};
