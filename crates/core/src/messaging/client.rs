use crate::config::Settings;
use crate::messaging::signature;
use crate::messaging::types::OutboundMessage;
use crate::messaging::MessageSink;
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.kik.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the Kik bot API: message sends, webhook configuration, and
/// inbound signature verification (all keyed by the bot username/API key).
#[derive(Debug, Clone)]
pub struct KikClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    api_key: String,
}

impl KikClient {
    pub fn new(username: &str, api_key: &str, base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build kik http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let username = settings.require_bot_username()?;
        let api_key = settings.require_bot_api_key()?;
        let base_url = settings
            .kik_api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL);
        Self::new(username, api_key, base_url)
    }

    /// Checks the `X-Kik-Signature` header against the raw request body.
    pub fn verify_signature(&self, header: Option<&str>, body: &[u8]) -> bool {
        signature::verify(&self.api_key, header, body)
    }

    pub async fn send_messages(&self, messages: &[OutboundMessage]) -> Result<()> {
        let url = format!("{}/v1/message", self.base_url);
        let req = SendMessagesRequest { messages };

        let res = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.api_key))
            .json(&req)
            .send()
            .await
            .context("kik send request failed")?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("kik send HTTP {status}: {text}");
        }
        Ok(())
    }

    /// Registers the webhook callback URL with the platform.
    pub async fn set_configuration(&self, webhook: &str) -> Result<()> {
        let url = format!("{}/v1/config", self.base_url);
        let req = ConfigurationRequest { webhook };

        let res = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.api_key))
            .json(&req)
            .send()
            .await
            .context("kik config request failed")?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("kik config HTTP {status}: {text}");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MessageSink for KikClient {
    async fn send(&self, messages: &[OutboundMessage]) -> Result<()> {
        self.send_messages(messages).await
    }
}

#[derive(Debug, Serialize)]
struct SendMessagesRequest<'a> {
    messages: &'a [OutboundMessage],
}

#[derive(Debug, Serialize)]
struct ConfigurationRequest<'a> {
    webhook: &'a str,
}
