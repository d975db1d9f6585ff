use serde::{Deserialize, Serialize};

/// Body of a webhook delivery: a batch of raw message objects.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub messages: Vec<InboundMessage>,
}

/// Inbound message, tagged by the platform's `type` field. Everything the bot
/// does not handle collapses into `Other` and is ignored downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "text")]
    Text(TextMessage),

    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub from: String,
    pub chat_id: String,
    #[serde(default)]
    pub body: String,
}

/// Outbound message in the platform's send-API wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "text", rename_all = "camelCase")]
    Text {
        to: String,
        chat_id: String,
        body: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        keyboards: Vec<Keyboard>,
    },

    #[serde(rename = "link", rename_all = "camelCase")]
    Link {
        to: String,
        chat_id: String,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pic_url: Option<String>,
    },
}

impl OutboundMessage {
    pub fn text(to: &str, chat_id: &str, body: &str) -> Self {
        Self::Text {
            to: to.to_string(),
            chat_id: chat_id.to_string(),
            body: body.to_string(),
            keyboards: Vec::new(),
        }
    }

    /// Text message carrying a suggested-response keyboard. An empty
    /// suggestion list degrades to a plain text message.
    pub fn text_with_suggestions(to: &str, chat_id: &str, body: &str, suggestions: &[String]) -> Self {
        let keyboards = if suggestions.is_empty() {
            Vec::new()
        } else {
            vec![Keyboard::suggested(suggestions)]
        };
        Self::Text {
            to: to.to_string(),
            chat_id: chat_id.to_string(),
            body: body.to_string(),
            keyboards,
        }
    }

    pub fn link(to: &str, chat_id: &str, url: &str, title: &str, pic_url: &str) -> Self {
        Self::Link {
            to: to.to_string(),
            chat_id: chat_id.to_string(),
            url: url.to_string(),
            title: Some(title.to_string()),
            text: None,
            pic_url: Some(pic_url.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Keyboard {
    #[serde(rename = "suggested")]
    Suggested {
        hidden: bool,
        responses: Vec<KeyboardResponse>,
    },
}

impl Keyboard {
    pub fn suggested(bodies: &[String]) -> Self {
        Self::Suggested {
            hidden: false,
            responses: bodies
                .iter()
                .map(|body| KeyboardResponse::Text { body: body.clone() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum KeyboardResponse {
    #[serde(rename = "text")]
    Text { body: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_text_and_ignores_unknown_types() {
        let v = json!({
            "messages": [
                {"type": "text", "from": "alice", "chatId": "chat-1", "body": "$AAPL"},
                {"type": "start-chatting", "from": "bob", "chatId": "chat-2"},
                {"type": "picture", "from": "carol", "chatId": "chat-3", "picUrl": "http://x"}
            ]
        });

        let payload: WebhookPayload = serde_json::from_value(v).unwrap();
        assert_eq!(payload.messages.len(), 3);
        match &payload.messages[0] {
            InboundMessage::Text(t) => {
                assert_eq!(t.from, "alice");
                assert_eq!(t.chat_id, "chat-1");
                assert_eq!(t.body, "$AAPL");
            }
            other => panic!("expected text message, got {other:?}"),
        }
        assert!(matches!(payload.messages[1], InboundMessage::Other));
        assert!(matches!(payload.messages[2], InboundMessage::Other));
    }

    #[test]
    fn text_message_body_defaults_to_empty() {
        let v = json!({"type": "text", "from": "alice", "chatId": "chat-1"});
        let msg: InboundMessage = serde_json::from_value(v).unwrap();
        match msg {
            InboundMessage::Text(t) => assert_eq!(t.body, ""),
            other => panic!("expected text message, got {other:?}"),
        }
    }

    #[test]
    fn serializes_text_with_keyboard_in_wire_shape() {
        let msg = OutboundMessage::text_with_suggestions(
            "alice",
            "chat-1",
            "Are you looking for...",
            &["$AAPL".to_string(), "^DJI".to_string()],
        );

        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "text");
        assert_eq!(v["to"], "alice");
        assert_eq!(v["chatId"], "chat-1");
        assert_eq!(v["keyboards"][0]["type"], "suggested");
        assert_eq!(v["keyboards"][0]["hidden"], false);
        assert_eq!(v["keyboards"][0]["responses"][0]["type"], "text");
        assert_eq!(v["keyboards"][0]["responses"][0]["body"], "$AAPL");
        assert_eq!(v["keyboards"][0]["responses"][1]["body"], "^DJI");
    }

    #[test]
    fn plain_text_omits_keyboards_key() {
        let msg = OutboundMessage::text("alice", "chat-1", "Looking up...");
        let v = serde_json::to_value(&msg).unwrap();
        assert!(v.get("keyboards").is_none());
    }

    #[test]
    fn serializes_link_with_camel_case_fields() {
        let msg = OutboundMessage::link(
            "alice",
            "chat-1",
            "https://finance.yahoo.com/q?s=AAPL",
            "Yahoo Finance: AAPL",
            "https://chart.finance.yahoo.com/z?s=AAPL",
        );

        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "link");
        assert_eq!(v["chatId"], "chat-1");
        assert_eq!(v["url"], "https://finance.yahoo.com/q?s=AAPL");
        assert_eq!(v["picUrl"], "https://chart.finance.yahoo.com/z?s=AAPL");
        assert!(v.get("text").is_none());
    }
}
