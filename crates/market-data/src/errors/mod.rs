//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for catalog and provider operations
//! - [`FailureKind`]: Classification used when a failure is counted and logged

mod kind;

pub use kind::FailureKind;

use thiserror::Error;

/// Errors that can occur while talking to the symbol catalog or a price provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The request to the remote service timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The service that timed out
        provider: String,
    },

    /// The remote service answered with a non-success HTTP status.
    #[error("Unexpected HTTP status {status} from {provider}")]
    HttpStatus {
        /// The service that answered
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The payload could not be decoded into the expected shape.
    #[error("Malformed {source_name} payload: {message}")]
    Parse {
        /// Where the payload came from (catalog URL or provider id)
        source_name: String,
        /// Description of the decoding failure
        message: String,
    },

    /// A network error occurred while communicating with a remote service.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockfetch_market_data::errors::{FailureKind, MarketDataError};
    ///
    /// let error = MarketDataError::Timeout { provider: "YAHOO".to_string() };
    /// assert_eq!(error.kind(), FailureKind::Network);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.kind(), FailureKind::Parse);
    /// ```
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout { .. } | Self::HttpStatus { .. } | Self::ProviderError { .. } => {
                FailureKind::Network
            }

            // The provider answered, but not with anything we can use
            Self::SymbolNotFound(_) | Self::Parse { .. } => FailureKind::Parse,

            Self::Network(e) if e.is_decode() => FailureKind::Parse,
            Self::Network(_) => FailureKind::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_network() {
        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(error.kind(), FailureKind::Network);
    }

    #[test]
    fn test_http_status_is_network() {
        let error = MarketDataError::HttpStatus {
            provider: "CATALOG".to_string(),
            status: 503,
        };
        assert_eq!(error.kind(), FailureKind::Network);
    }

    #[test]
    fn test_provider_error_is_network() {
        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(error.kind(), FailureKind::Network);
    }

    #[test]
    fn test_parse_and_symbol_not_found_are_parse() {
        let error = MarketDataError::Parse {
            source_name: "catalog".to_string(),
            message: "expected array".to_string(),
        };
        assert_eq!(error.kind(), FailureKind::Parse);

        let error = MarketDataError::SymbolNotFound("ZZZ".to_string());
        assert_eq!(error.kind(), FailureKind::Parse);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::HttpStatus {
            provider: "CATALOG".to_string(),
            status: 404,
        };
        assert_eq!(
            format!("{}", error),
            "Unexpected HTTP status 404 from CATALOG"
        );

        let error = MarketDataError::Parse {
            source_name: "YAHOO".to_string(),
            message: "bad timestamp".to_string(),
        };
        assert_eq!(format!("{}", error), "Malformed YAHOO payload: bad timestamp");
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Network.to_string(), "network");
        assert_eq!(FailureKind::Parse.to_string(), "parse");
        assert_eq!(FailureKind::Persistence.to_string(), "persistence");
    }
}
