//! Symbol catalog: enumerates the full tradable universe.
//!
//! The catalog is a single JSON document (an array of objects, each with a
//! `Symbol` field). It is fetched in one request: no pagination, no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, info};

use crate::errors::MarketDataError;
use crate::models::ListedSymbol;

/// NASDAQ listed-securities document published on datahub.io.
pub const NASDAQ_LISTED_URL: &str = "https://pkgstore.datahub.io/core/nasdaq-listings/nasdaq-listed_json/data/a5bc7580d6176d60ac0b2142ca8d7df6/nasdaq-listed_json.json";

const CATALOG_ID: &str = "CATALOG";

/// Source of the symbol universe.
#[async_trait]
pub trait SymbolCatalog: Send + Sync {
    /// Fetch every symbol in the universe, in catalog order.
    ///
    /// An empty universe is a valid answer, not an error.
    async fn fetch_all_symbols(&self) -> Result<Vec<String>, MarketDataError>;
}

/// Catalog backed by one HTTP GET against a fixed URL.
pub struct HttpSymbolCatalog {
    client: reqwest::Client,
    url: String,
}

impl HttpSymbolCatalog {
    /// Create a catalog client for `url` with a whole-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SymbolCatalog for HttpSymbolCatalog {
    async fn fetch_all_symbols(&self) -> Result<Vec<String>, MarketDataError> {
        debug!("Fetching symbol catalog from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: CATALOG_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                provider: CATALOG_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let symbols = parse_symbol_listing(&body)?;

        info!("Symbol catalog returned {} symbols", symbols.len());
        Ok(symbols)
    }
}

/// Decode a catalog document and project each entry's `Symbol` field.
///
/// Order is preserved and duplicates are kept; surrounding whitespace is trimmed.
pub fn parse_symbol_listing(body: &str) -> Result<Vec<String>, MarketDataError> {
    let listed: Vec<ListedSymbol> =
        serde_json::from_str(body).map_err(|e| MarketDataError::Parse {
            source_name: CATALOG_ID.to_string(),
            message: e.to_string(),
        })?;

    Ok(listed
        .into_iter()
        .map(|entry| entry.symbol.trim().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;

    #[test]
    fn test_parse_symbol_listing_preserves_order() {
        let body = r#"[
            {"Symbol": "CCC", "Company Name": "C Corp"},
            {"Symbol": "AAA", "Company Name": "A Corp"},
            {"Symbol": "BBB", "Company Name": "B Corp"}
        ]"#;
        let symbols = parse_symbol_listing(body).unwrap();
        assert_eq!(symbols, vec!["CCC", "AAA", "BBB"]);
    }

    #[test]
    fn test_parse_symbol_listing_empty_array() {
        let symbols = parse_symbol_listing("[]").unwrap();
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_parse_symbol_listing_trims_and_keeps_duplicates() {
        let body = r#"[{"Symbol": " AAA "}, {"Symbol": "AAA"}]"#;
        let symbols = parse_symbol_listing(body).unwrap();
        assert_eq!(symbols, vec!["AAA", "AAA"]);
    }

    #[test]
    fn test_parse_symbol_listing_malformed() {
        let err = parse_symbol_listing("<html>not json</html>").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Parse);
    }

    #[test]
    fn test_parse_symbol_listing_not_an_array() {
        let err = parse_symbol_listing(r#"{"Symbol": "AAA"}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Parse);
    }

    #[test]
    fn test_parse_symbol_listing_missing_symbol_field() {
        let body = r#"[{"Symbol": "AAA"}, {"Company Name": "No Symbol Inc."}]"#;
        let err = parse_symbol_listing(body).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_network_error() {
        // Nothing listens on the discard port on loopback
        let catalog =
            HttpSymbolCatalog::new("http://127.0.0.1:9/listing.json", Duration::from_secs(5))
                .unwrap();
        let err = catalog.fetch_all_symbols().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
    }
}
