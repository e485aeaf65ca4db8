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

/// Idempotent schema bootstrap, run once at startup.
///
/// Timestamp columns are TIMESTAMP (no time zone) on purpose: all values are
/// normalized to UTC wall clock at the ingestion boundary. The two partial
/// unique indexes are what make concurrent duplicate ingestion safe: the
/// ingest flow catches the violation and re-reads.
pub async fn bootstrap_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_posts (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            source TEXT NOT NULL DEFAULT 'telegram',
            link TEXT,
            source_channel TEXT,
            source_message_id BIGINT,
            salary INTEGER,
            location TEXT,
            format TEXT,
            work_time TEXT,
            industry TEXT,
            contact_info TEXT,
            published_at TIMESTAMP,
            parsed_at TIMESTAMP,
            deadline DATE,
            created_at TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc')
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Strong identity: one row per (channel, message id).
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_job_posts_origin
        ON job_posts (source_channel, source_message_id)
        WHERE source_channel IS NOT NULL AND source_message_id IS NOT NULL
        "#,
    )
    .execute(pool)
    .await?;

    // Weak identity for rows without origin metadata. Hashed columns keep the
    // index small; descriptions run to kilobytes.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_job_posts_content
        ON job_posts (source, md5(title), md5(description))
        WHERE source_channel IS NULL OR source_message_id IS NULL
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL UNIQUE,
            full_name TEXT,
            gender TEXT,
            phone_number TEXT,
            email TEXT,
            citizenship TEXT,
            address TEXT,
            resume_text TEXT,
            education TEXT,
            experience TEXT,
            experience_level TEXT,
            skills TEXT,
            languages TEXT,
            interests TEXT,
            achievements TEXT,
            desired_position TEXT,
            desired_salary INTEGER,
            desired_city TEXT,
            desired_format TEXT,
            desired_work_time TEXT,
            industries TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc')
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Schema bootstrap completed");
    Ok(())
}
