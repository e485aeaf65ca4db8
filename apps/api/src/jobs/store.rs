//! Job post queries. All writes go through these helpers so the identity
//! invariant (one row per key) is enforced in exactly one place: the
//! database's unique indexes.

use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::job::{IncomingJob, JobKey, JobPost};

/// Looks a job up by its canonical identity key.
pub async fn find_by_key(pool: &PgPool, key: &JobKey<'_>) -> Result<Option<JobPost>, sqlx::Error> {
    match key {
        JobKey::Strong {
            channel,
            message_id,
        } => {
            sqlx::query_as::<_, JobPost>(
                "SELECT * FROM job_posts WHERE source_channel = $1 AND source_message_id = $2",
            )
            .bind(*channel)
            .bind(*message_id)
            .fetch_optional(pool)
            .await
        }
        JobKey::Weak {
            title,
            description,
            source,
        } => {
            sqlx::query_as::<_, JobPost>(
                "SELECT * FROM job_posts WHERE title = $1 AND description = $2 AND source = $3",
            )
            .bind(*title)
            .bind(*description)
            .bind(*source)
            .fetch_optional(pool)
            .await
        }
    }
}

/// Inserts a new job post. Timestamps are stored timezone-naive.
/// Fails with a unique violation if another worker inserted the same key
/// concurrently; the ingest flow handles that by re-reading.
pub async fn insert(pool: &PgPool, incoming: &IncomingJob) -> Result<JobPost, sqlx::Error> {
    sqlx::query_as::<_, JobPost>(
        r#"
        INSERT INTO job_posts
            (title, description, source, link, source_channel, source_message_id,
             salary, location, format, work_time, industry, contact_info,
             published_at, parsed_at, deadline)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(&incoming.title)
    .bind(&incoming.description)
    .bind(&incoming.source)
    .bind(&incoming.link)
    .bind(&incoming.source_channel)
    .bind(incoming.source_message_id)
    .bind(incoming.salary)
    .bind(&incoming.location)
    .bind(&incoming.format)
    .bind(&incoming.work_time)
    .bind(&incoming.industry)
    .bind(&incoming.contact_info)
    .bind(incoming.published_at)
    .bind(incoming.parsed_at)
    .bind(incoming.deadline)
    .fetch_one(pool)
    .await
}

/// Persists the extracted-field subset of a merged re-sighting row. The
/// bounded merge itself is decided in `ingest::resight`; this writes the six
/// mutable columns verbatim. Title, description, and identity fields are
/// never touched.
pub async fn save_extracted_fields(pool: &PgPool, job: &JobPost) -> Result<JobPost, sqlx::Error> {
    sqlx::query_as::<_, JobPost>(
        r#"
        UPDATE job_posts
        SET salary    = $2,
            location  = $3,
            deadline  = $4,
            format    = $5,
            work_time = $6,
            industry  = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job.id)
    .bind(job.salary)
    .bind(&job.location)
    .bind(job.deadline)
    .bind(&job.format)
    .bind(&job.work_time)
    .bind(&job.industry)
    .fetch_one(pool)
    .await
}

/// All stored jobs, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<JobPost>, sqlx::Error> {
    sqlx::query_as::<_, JobPost>("SELECT * FROM job_posts ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

/// Optional job-search filters. Absent filters match everything; active
/// filters are ANDed. Text filters are case-insensitive substring matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilters {
    pub salary_min: Option<i32>,
    pub industry: Option<String>,
    pub title: Option<String>,
    pub format: Option<String>,
    pub location: Option<String>,
}

/// Filtered job search, newest first.
pub async fn search(pool: &PgPool, filters: &JobFilters) -> Result<Vec<JobPost>, sqlx::Error> {
    sqlx::query_as::<_, JobPost>(
        r#"
        SELECT * FROM job_posts
        WHERE ($1::integer IS NULL OR salary >= $1)
          AND ($2::text IS NULL OR industry ILIKE '%' || $2 || '%')
          AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%')
          AND ($4::text IS NULL OR format ILIKE '%' || $4 || '%')
          AND ($5::text IS NULL OR location ILIKE '%' || $5 || '%')
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(filters.salary_min)
    .bind(&filters.industry)
    .bind(&filters.title)
    .bind(&filters.format)
    .bind(&filters.location)
    .fetch_all(pool)
    .await
}

/// Deletes every job whose publish timestamp (creation timestamp when the
/// channel did not report one) is older than the cutoff. One statement, one
/// transactional unit. Returns the number of rows removed.
pub async fn delete_older_than(pool: &PgPool, cutoff: NaiveDateTime) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM job_posts WHERE COALESCE(published_at, created_at) < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_default_to_no_constraints() {
        let filters: JobFilters = serde_json::from_str("{}").unwrap();
        assert_eq!(filters.salary_min, None);
        assert_eq!(filters.industry, None);
        assert_eq!(filters.title, None);
        assert_eq!(filters.format, None);
        assert_eq!(filters.location, None);
    }

    #[test]
    fn test_filters_parse_from_query_payload() {
        let filters: JobFilters =
            serde_json::from_str(r#"{"salary_min": 100000, "industry": "fintech"}"#).unwrap();
        assert_eq!(filters.salary_min, Some(100_000));
        assert_eq!(filters.industry.as_deref(), Some("fintech"));
        assert_eq!(filters.title, None);
    }
}
