//! Stockfetch Market Data Crate
//!
//! This crate talks to the two remote collaborators of the bulk fetch pipeline:
//! - the symbol catalog, which lists the full tradable universe
//! - the daily price history provider (Yahoo Finance)
//!
//! # Architecture
//!
//! ```text
//! +------------------+          +------------------+
//! |  SymbolCatalog   |          |  Provider        |  (Yahoo)
//! +------------------+          +------------------+
//!          |                             |
//!          v                             v
//!    Vec<String>                    Vec<Quote>     (daily OHLCV)
//! ```
//!
//! Neither side retries. Every failure surfaces as a [`MarketDataError`]
//! which can be classified with [`MarketDataError::kind`].

pub mod catalog;
pub mod errors;
pub mod models;
pub mod provider;

pub use catalog::{parse_symbol_listing, HttpSymbolCatalog, SymbolCatalog, NASDAQ_LISTED_URL};
pub use errors::{FailureKind, MarketDataError};
pub use models::{ListedSymbol, Quote};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
