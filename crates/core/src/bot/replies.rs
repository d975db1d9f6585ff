use crate::messaging::types::OutboundMessage;
use crate::quotes::types::TickerCandidate;

pub const LOOKING_UP: &str = "Looking up...";
pub const ARE_YOU_LOOKING_FOR: &str = "Are you looking for...";
pub const WHAT_ARE_YOU_LOOKING_FOR: &str = "What are you looking for?";
pub const DONT_UNDERSTAND: &str = "Sorry, I didn't understand that message.";

/// Display caps for quick-reply suggestion keyboards.
pub const TICKER_SUGGESTION_LIMIT: usize = 4;
pub const LOOKUP_SUGGESTION_LIMIT: usize = 8;

const USAGE_QUOTES: &str = "For live stock quotes type \"$\" followed by a ticker symbol or \"lookup\" followed by a company name.";
const USAGE_EXAMPLE: &str =
    "For example, if you want to look up Apple, type \"$AAPL\" or \"lookup Apple\".";
const USAGE_INDEX: &str =
    "For index quotes, start with \"^\". For example, \"^DJI\" for Dow Jones Industrial Average.";
const USAGE_TRY_IT: &str = "Try it now:";
const USAGE_TRY_IT_SUGGESTION: &str = "Lookup Apple";

pub fn greeting(from: &str) -> String {
    format!("Hi {from}!")
}

pub fn price_found(symbol: &str, price: &str) -> String {
    format!("Price of {symbol} is {price}")
}

pub fn ticker_not_found(symbol: &str) -> String {
    format!("We couldn't find a ticker with {symbol}.")
}

pub fn quote_page_url(symbol: &str) -> String {
    format!("https://finance.yahoo.com/q?s={symbol}")
}

pub fn quote_link_title(symbol: &str) -> String {
    format!("Yahoo Finance: {symbol}")
}

pub fn chart_pic_url(symbol: &str) -> String {
    format!("https://chart.finance.yahoo.com/z?s={symbol}")
}

/// Suggestions offered after a failed ticker lookup: `$SYMBOL` quick replies,
/// except index symbols (containing `^`) which are kept as-is.
pub fn ticker_suggestions(candidates: &[TickerCandidate]) -> Vec<String> {
    candidates
        .iter()
        .take(TICKER_SUGGESTION_LIMIT)
        .map(|c| {
            if c.symbol.contains('^') {
                c.symbol.clone()
            } else {
                format!("${}", c.symbol)
            }
        })
        .collect()
}

/// Suggestions for an explicit `lookup` request, always `$`-prefixed.
pub fn lookup_suggestions(candidates: &[TickerCandidate]) -> Vec<String> {
    candidates
        .iter()
        .take(LOOKUP_SUGGESTION_LIMIT)
        .map(|c| format!("${}", c.symbol))
        .collect()
}

/// The fixed 4-part usage instruction sequence sent after every fallback
/// reply; the final part carries the "Lookup Apple" quick reply.
pub fn usage_messages(to: &str, chat_id: &str) -> Vec<OutboundMessage> {
    vec![
        OutboundMessage::text(to, chat_id, USAGE_QUOTES),
        OutboundMessage::text(to, chat_id, USAGE_EXAMPLE),
        OutboundMessage::text(to, chat_id, USAGE_INDEX),
        OutboundMessage::text_with_suggestions(
            to,
            chat_id,
            USAGE_TRY_IT,
            &[USAGE_TRY_IT_SUGGESTION.to_string()],
        ),
    ]
}
