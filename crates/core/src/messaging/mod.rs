pub mod client;
pub mod signature;
pub mod types;

use crate::messaging::types::OutboundMessage;
use anyhow::Result;

/// Outbound side of the messaging platform. `KikClient` is the real
/// implementation; tests substitute a recording sink.
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, messages: &[OutboundMessage]) -> Result<()>;
}
