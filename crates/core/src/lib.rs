pub mod bot;
pub mod messaging;
pub mod quotes;
pub mod storage;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub bot_username: Option<String>,
        pub bot_api_key: Option<String>,
        pub bot_webhook: Option<String>,
        pub database_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub kik_api_base_url: Option<String>,
        pub quote_api_base_url: Option<String>,
        pub symbol_search_base_url: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                bot_username: std::env::var("BOT_USERNAME").ok(),
                bot_api_key: std::env::var("BOT_API_KEY").ok(),
                bot_webhook: std::env::var("BOT_WEBHOOK").ok(),
                database_url: std::env::var("DATABASE_URL").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                kik_api_base_url: std::env::var("KIK_API_BASE_URL").ok(),
                quote_api_base_url: std::env::var("QUOTE_API_BASE_URL").ok(),
                symbol_search_base_url: std::env::var("SYMBOL_SEARCH_BASE_URL").ok(),
            })
        }

        pub fn require_bot_username(&self) -> anyhow::Result<&str> {
            self.bot_username
                .as_deref()
                .context("BOT_USERNAME is required")
        }

        pub fn require_bot_api_key(&self) -> anyhow::Result<&str> {
            self.bot_api_key
                .as_deref()
                .context("BOT_API_KEY is required")
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }
    }
}
