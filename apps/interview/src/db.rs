use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the history table and its ordering index if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_turns (
            id          BIGSERIAL PRIMARY KEY,
            session_id  TEXT        NOT NULL,
            recorded_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            question    TEXT,
            answer      TEXT,
            field       TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS interview_turns_session_idx \
         ON interview_turns (session_id, recorded_at, id)",
    )
    .execute(pool)
    .await?;

    info!("Schema ready: interview_turns");
    Ok(())
}
