use serde::Deserialize;

/// One symbol-search result, in the search provider's response shape.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerCandidate {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "exchDisp")]
    pub exchange: String,
    #[serde(default, rename = "typeDisp")]
    pub instrument_type: String,
}
