use serde::{Deserialize, Serialize};

/// One entry of the symbol catalog.
///
/// The catalog document carries more columns per entry (company name,
/// market category, ...). Only `Symbol` is required; everything else is ignored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListedSymbol {
    #[serde(rename = "Symbol")]
    pub symbol: String,
}
