pub mod types;
pub mod yahoo;

use crate::quotes::types::TickerCandidate;

/// Quote/lookup side of the bot. Failures never escape: a provider problem is
/// indistinguishable from "not found" at the call site, so the bot always has
/// a user-facing fallback.
#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Current price for a ticker symbol, formatted as currency text.
    async fn price(&self, symbol: &str) -> Option<String>;

    /// Candidate symbols matching a free-text query, in provider order.
    async fn search(&self, query: &str) -> Vec<TickerCandidate>;
}
