use anyhow::Context;

/// Appends one raw webhook payload to the audit log. Write-only from the
/// bot's perspective; nothing in the request path reads it back.
pub async fn append(
    pool: &sqlx::PgPool,
    original: &serde_json::Value,
) -> anyhow::Result<uuid::Uuid> {
    let id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO chat_records (original, received_at) \
         VALUES ($1, $2) \
         RETURNING id",
    )
    .bind(original)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .context("insert chat_records failed")?;

    Ok(id)
}
