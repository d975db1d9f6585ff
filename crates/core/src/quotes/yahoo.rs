use crate::config::Settings;
use crate::quotes::types::TickerCandidate;
use crate::quotes::QuoteProvider;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_QUOTE_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_SEARCH_BASE_URL: &str = "https://d.yimg.com/aq";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// The autocomplete endpoint only answers JSONP; the callback name is fixed and
// stripped off before JSON parsing.
const JSONP_CALLBACK: &str = "YAHOO.util.ScriptNodeDataSource.callbacks";

/// Yahoo Finance quote + symbol-search client.
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    http: reqwest::Client,
    quote_base_url: String,
    search_base_url: String,
}

impl YahooFinanceClient {
    pub fn new(quote_base_url: &str, search_base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build quote http client")?;

        Ok(Self {
            http,
            quote_base_url: quote_base_url.trim_end_matches('/').to_string(),
            search_base_url: search_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let quote_base_url = settings
            .quote_api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_QUOTE_BASE_URL);
        let search_base_url = settings
            .symbol_search_base_url
            .as_deref()
            .unwrap_or(DEFAULT_SEARCH_BASE_URL);
        Self::new(quote_base_url, search_base_url)
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Option<String>> {
        let url = format!("{}/v7/finance/quote", self.quote_base_url);

        let res = self
            .http
            .get(url)
            .query(&[("symbols", symbol)])
            .send()
            .await
            .context("quote request failed")?;

        let status = res.status();
        let text = res.text().await.context("failed to read quote response")?;
        if !status.is_success() {
            anyhow::bail!("quote provider HTTP {status}: {text}");
        }

        let parsed = serde_json::from_str::<QuoteEnvelope>(&text)
            .context("failed to parse quote response")?;

        Ok(parsed
            .quote_response
            .result
            .into_iter()
            .next()
            .and_then(|q| q.regular_market_price)
            .map(|p| format!("{p:.2}")))
    }

    async fn fetch_candidates(&self, query: &str) -> Result<Vec<TickerCandidate>> {
        let url = format!("{}/autoc", self.search_base_url);

        let res = self
            .http
            .get(url)
            .query(&[
                ("query", query),
                ("region", "US"),
                ("lang", "en-US"),
                ("callback", JSONP_CALLBACK),
            ])
            .send()
            .await
            .context("symbol search request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read symbol search response")?;
        if !status.is_success() {
            anyhow::bail!("symbol search HTTP {status}: {text}");
        }

        let parsed = serde_json::from_str::<AutocEnvelope>(strip_jsonp(&text))
            .context("failed to parse symbol search response")?;

        Ok(parsed.result_set.result)
    }
}

#[async_trait::async_trait]
impl QuoteProvider for YahooFinanceClient {
    async fn price(&self, symbol: &str) -> Option<String> {
        match self.fetch_price(symbol).await {
            Ok(price) => price,
            Err(err) => {
                tracing::warn!(symbol, error = %err, "price lookup failed; treating as not found");
                None
            }
        }
    }

    async fn search(&self, query: &str) -> Vec<TickerCandidate> {
        match self.fetch_candidates(query).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(query, error = %err, "symbol search failed; treating as empty");
                Vec::new()
            }
        }
    }
}

fn strip_jsonp(text: &str) -> &str {
    let t = text.trim();
    let t = t
        .strip_prefix(JSONP_CALLBACK)
        .map(|rest| rest.trim_start_matches('('))
        .unwrap_or(t);
    t.strip_suffix(");").unwrap_or(t)
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse", default)]
    quote_response: QuoteResponseBody,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteResponseBody {
    #[serde(default)]
    result: Vec<QuoteResult>,
}

#[derive(Debug, Deserialize)]
struct QuoteResult {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AutocEnvelope {
    #[serde(rename = "ResultSet", default)]
    result_set: AutocResultSet,
}

#[derive(Debug, Default, Deserialize)]
struct AutocResultSet {
    #[serde(rename = "Result", default)]
    result: Vec<TickerCandidate>,
}
