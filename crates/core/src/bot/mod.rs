pub mod intent;
pub mod replies;

use crate::bot::intent::{Intent, IntentClassifier};
use crate::messaging::types::{InboundMessage, OutboundMessage, TextMessage};
use crate::messaging::MessageSink;
use crate::quotes::QuoteProvider;
use anyhow::Result;
use std::sync::Arc;

/// Per-message bot engine. Holds no cross-request state; each text message
/// runs Classified -> Lookups -> Sends to completion within the request.
pub struct Bot {
    classifier: IntentClassifier,
    quotes: Arc<dyn QuoteProvider>,
    sink: Arc<dyn MessageSink>,
}

impl Bot {
    pub fn new(quotes: Arc<dyn QuoteProvider>, sink: Arc<dyn MessageSink>) -> Result<Self> {
        Ok(Self {
            classifier: IntentClassifier::new()?,
            quotes,
            sink,
        })
    }

    /// Processes one webhook batch in message order. Non-text messages are
    /// skipped.
    pub async fn handle_messages(&self, messages: &[InboundMessage]) {
        for message in messages {
            match message {
                InboundMessage::Text(text) => self.handle_text(text).await,
                InboundMessage::Other => {}
            }
        }
    }

    async fn handle_text(&self, msg: &TextMessage) {
        tracing::info!(from = %msg.from, chat_id = %msg.chat_id, "handling text message");

        match self.classifier.classify(&msg.body) {
            Intent::TickerQuote { symbols } => self.reply_ticker_quotes(msg, &symbols).await,
            Intent::IndexQuote { symbols } => self.reply_index_quotes(msg, &symbols).await,
            Intent::Lookup { query } => self.reply_lookup(msg, query.as_deref()).await,
            Intent::Fallback { greeting } => self.reply_fallback(msg, greeting).await,
        }
    }

    async fn reply_ticker_quotes(&self, msg: &TextMessage, symbols: &[String]) {
        self.send_text(msg, replies::LOOKING_UP).await;

        for symbol in symbols {
            match self.quotes.price(symbol).await {
                Some(price) => {
                    self.send_text(msg, &replies::price_found(symbol, &price))
                        .await;
                    self.send(OutboundMessage::link(
                        &msg.from,
                        &msg.chat_id,
                        &replies::quote_page_url(symbol),
                        &replies::quote_link_title(symbol),
                        &replies::chart_pic_url(symbol),
                    ))
                    .await;
                }
                None => {
                    self.send_text(msg, &replies::ticker_not_found(symbol)).await;

                    let candidates = self.quotes.search(symbol).await;
                    let suggestions = replies::ticker_suggestions(&candidates);
                    if suggestions.is_empty() {
                        self.send_text(msg, replies::WHAT_ARE_YOU_LOOKING_FOR).await;
                    } else {
                        self.send(OutboundMessage::text_with_suggestions(
                            &msg.from,
                            &msg.chat_id,
                            replies::ARE_YOU_LOOKING_FOR,
                            &suggestions,
                        ))
                        .await;
                    }
                }
            }
        }
    }

    async fn reply_index_quotes(&self, msg: &TextMessage, symbols: &[String]) {
        self.send_text(msg, replies::LOOKING_UP).await;

        // Indices are treated as already valid: link only, no price lookup.
        for symbol in symbols {
            self.send(OutboundMessage::link(
                &msg.from,
                &msg.chat_id,
                &replies::quote_page_url(symbol),
                &replies::quote_link_title(symbol),
                &replies::chart_pic_url(symbol),
            ))
            .await;
        }
    }

    async fn reply_lookup(&self, msg: &TextMessage, query: Option<&str>) {
        let Some(query) = query else {
            self.send_text(msg, replies::WHAT_ARE_YOU_LOOKING_FOR).await;
            return;
        };

        let candidates = self.quotes.search(query).await;
        let suggestions = replies::lookup_suggestions(&candidates);
        if suggestions.is_empty() {
            self.send_text(msg, replies::WHAT_ARE_YOU_LOOKING_FOR).await;
        } else {
            self.send(OutboundMessage::text_with_suggestions(
                &msg.from,
                &msg.chat_id,
                replies::ARE_YOU_LOOKING_FOR,
                &suggestions,
            ))
            .await;
        }
    }

    async fn reply_fallback(&self, msg: &TextMessage, greeting: bool) {
        let first = if greeting {
            replies::greeting(&msg.from)
        } else {
            replies::DONT_UNDERSTAND.to_string()
        };
        self.send_text(msg, &first).await;

        for usage in replies::usage_messages(&msg.from, &msg.chat_id) {
            self.send(usage).await;
        }
    }

    async fn send_text(&self, msg: &TextMessage, body: &str) {
        self.send(OutboundMessage::text(&msg.from, &msg.chat_id, body))
            .await;
    }

    /// Best-effort send: a transport failure is logged, never surfaced.
    async fn send(&self, message: OutboundMessage) {
        if let Err(err) = self.sink.send(std::slice::from_ref(&message)).await {
            tracing::warn!(error = %err, "message send failed; dropping reply");
        }
    }
}
