use anyhow::{Context, Result};
use regex::Regex;

/// Classified intent of one inbound text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Body contained `$`; symbols are extracted with the `$` stripped and the
    /// original casing kept. May be empty when `$` appears without a symbol.
    TickerQuote { symbols: Vec<String> },

    /// Body contained `^` (and no `$`); symbols keep the leading `^` and are
    /// treated as already-valid indices.
    IndexQuote { symbols: Vec<String> },

    /// Body contained `lookup`; the query is the first word after it, absent
    /// when nothing follows.
    Lookup { query: Option<String> },

    /// Nothing matched. `greeting` is set when the body contains hi/hello.
    Fallback { greeting: bool },
}

/// Ordered first-match-wins classifier. Bodies can satisfy several patterns at
/// once ("lookup $AAPL"), so the check order is part of the contract:
/// `$`, then `^`, then `lookup`, then fallback.
#[derive(Debug)]
pub struct IntentClassifier {
    ticker: Regex,
    index: Regex,
    lookup: Regex,
}

impl IntentClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ticker: Regex::new(r"\$(\w+(?:\.\w+)?)").context("invalid ticker pattern")?,
            index: Regex::new(r"\^\w+(?:\.\w+)?").context("invalid index pattern")?,
            lookup: Regex::new(r"lookup (\w+)").context("invalid lookup pattern")?,
        })
    }

    pub fn classify(&self, body: &str) -> Intent {
        if body.contains('$') {
            let symbols = self
                .ticker
                .captures_iter(body)
                .map(|c| c[1].to_string())
                .collect();
            return Intent::TickerQuote { symbols };
        }

        if body.contains('^') {
            let symbols = self
                .index
                .find_iter(body)
                .map(|m| m.as_str().to_string())
                .collect();
            return Intent::IndexQuote { symbols };
        }

        let lower = body.to_lowercase();
        if lower.contains("lookup") {
            let query = self.lookup.captures(&lower).map(|c| c[1].to_string());
            return Intent::Lookup { query };
        }

        Intent::Fallback {
            greeting: lower.contains("hi") || lower.contains("hello"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(body: &str) -> Intent {
        IntentClassifier::new().unwrap().classify(body)
    }

    #[test]
    fn extracts_tickers_case_preserving() {
        assert_eq!(
            classify("what about $AAPL and $msft today?"),
            Intent::TickerQuote {
                symbols: vec!["AAPL".to_string(), "msft".to_string()]
            }
        );
    }

    #[test]
    fn extracts_dotted_ticker() {
        assert_eq!(
            classify("$BRK.B"),
            Intent::TickerQuote {
                symbols: vec!["BRK.B".to_string()]
            }
        );
    }

    #[test]
    fn bare_dollar_sign_yields_no_symbols() {
        assert_eq!(
            classify("costs $ 100"),
            Intent::TickerQuote { symbols: vec![] }
        );
    }

    #[test]
    fn index_symbols_keep_caret() {
        assert_eq!(
            classify("^DJI and ^GSPC please"),
            Intent::IndexQuote {
                symbols: vec!["^DJI".to_string(), "^GSPC".to_string()]
            }
        );
    }

    #[test]
    fn dollar_wins_over_caret_and_lookup() {
        assert_eq!(
            classify("lookup ^DJI or $AAPL"),
            Intent::TickerQuote {
                symbols: vec!["AAPL".to_string()]
            }
        );
    }

    #[test]
    fn caret_wins_over_lookup() {
        assert_eq!(
            classify("lookup ^DJI"),
            Intent::IndexQuote {
                symbols: vec!["^DJI".to_string()]
            }
        );
    }

    #[test]
    fn lookup_takes_first_following_word() {
        assert_eq!(
            classify("Lookup Apple computers"),
            Intent::Lookup {
                query: Some("apple".to_string())
            }
        );
    }

    #[test]
    fn lookup_without_query_word() {
        assert_eq!(classify("lookup"), Intent::Lookup { query: None });
    }

    #[test]
    fn greeting_fallback() {
        assert_eq!(classify("Hello there"), Intent::Fallback { greeting: true });
        assert_eq!(classify("HI"), Intent::Fallback { greeting: true });
    }

    #[test]
    fn unknown_fallback() {
        assert_eq!(
            classify("what is the weather"),
            Intent::Fallback { greeting: false }
        );
    }
}
