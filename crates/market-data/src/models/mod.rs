//! Market data models
//!
//! - `listing` - Catalog entries (ListedSymbol)
//! - `quote` - Daily OHLCV quotes returned by a provider (Quote)

mod listing;
mod quote;

pub use listing::ListedSymbol;
pub use quote::Quote;
