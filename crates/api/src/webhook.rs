use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;

use quotebot_core::bot::Bot;
use quotebot_core::messaging::client::KikClient;
use quotebot_core::messaging::types::WebhookPayload;

pub const SIGNATURE_HEADER: &str = "X-Kik-Signature";

#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<Bot>,
    pub kik: Arc<KikClient>,
    pub pool: Option<PgPool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/healthz", get(healthz))
        .route("/webhook", post(webhook))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello world"
}

async fn healthz() -> &'static str {
    "ok"
}

async fn webhook(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());
    if !state.kik.verify_signature(signature, &body) {
        tracing::warn!("webhook signature verification failed");
        return StatusCode::FORBIDDEN;
    }

    let raw: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(error = %err, "webhook body is not valid JSON");
            return StatusCode::BAD_REQUEST;
        }
    };
    let payload: WebhookPayload = match serde_json::from_value(raw.clone()) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!(error = %err, "webhook body has unexpected shape");
            return StatusCode::BAD_REQUEST;
        }
    };

    // Audit write is best-effort: a storage problem must not cost the reply.
    if let Some(pool) = &state.pool {
        if let Err(err) = quotebot_core::storage::chat_records::append(pool, &raw).await {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "failed to persist chat record");
        }
    }

    state.bot.handle_messages(&payload.messages).await;

    StatusCode::OK
}
