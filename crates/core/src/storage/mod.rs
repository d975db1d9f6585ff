pub mod chat_records;

use anyhow::Context;

/// Runs the embedded migrations so a fresh database needs no manual setup
/// before the audit log can accept writes.
pub async fn migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("chat_records migrations failed")?;
    Ok(())
}
