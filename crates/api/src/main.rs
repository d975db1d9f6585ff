use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quotebot_core::bot::Bot;
use quotebot_core::messaging::client::KikClient;
use quotebot_core::quotes::yahoo::YahooFinanceClient;

mod webhook;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = quotebot_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let pool: Option<PgPool> = match settings.require_database_url() {
        Ok(db_url) => match sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => match quotebot_core::storage::migrate(&pool).await {
                Ok(()) => Some(pool),
                Err(e) => {
                    sentry_anyhow::capture_anyhow(&e);
                    tracing::error!(error = %e, "db migrations failed; starting bot without audit log");
                    None
                }
            },
            Err(e) => {
                let err = anyhow::Error::new(e);
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "db connect failed; starting bot without audit log");
                None
            }
        },
        Err(e) => {
            tracing::info!(error = %e, "DATABASE_URL not set; starting bot without audit log");
            None
        }
    };

    let kik = Arc::new(KikClient::from_settings(&settings)?);
    let quotes = Arc::new(YahooFinanceClient::from_settings(&settings)?);
    let bot = Arc::new(Bot::new(quotes, kik.clone())?);

    if let Some(webhook_url) = settings.bot_webhook.as_deref() {
        match kik.set_configuration(webhook_url).await {
            Ok(()) => tracing::info!(webhook = webhook_url, "registered webhook configuration"),
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::warn!(error = %err, "webhook configuration failed; keeping existing configuration");
            }
        }
    }

    let state = webhook::AppState { bot, kik, pool };
    let app = webhook::router(state).layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "bot listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &quotebot_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
