//! Job deduplication: decides CREATE vs UPDATE vs NO-OP for an incoming
//! scraped record.
//!
//! Identity is resolved once into a [`JobKey`](crate::models::job::JobKey):
//! origin metadata (`channel` + `message id`) when the scraper has it,
//! content identity otherwise. A strong-key repeat is idempotent and returns
//! the stored row untouched. A weak-key repeat refreshes only the extracted
//! fields, since a later LLM extraction pass may have filled in what an
//! earlier one missed.
//!
//! Concurrent scraping workers may race on the same key. No application
//! lock: the unique indexes arbitrate, and the loser of the race re-reads
//! the winner's row.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::jobs::store;
use crate::models::job::{IncomingJob, JobKey, JobPost};

/// What ingestion did with the record.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    Created(JobPost),
    Updated(JobPost),
    Unchanged(JobPost),
}

impl IngestOutcome {
    pub fn job(&self) -> &JobPost {
        match self {
            IngestOutcome::Created(job)
            | IngestOutcome::Updated(job)
            | IngestOutcome::Unchanged(job) => job,
        }
    }
}

/// Ingests one scraped job record.
pub async fn ingest_job(pool: &PgPool, incoming: IncomingJob) -> Result<IngestOutcome> {
    let key = incoming.identity();

    if let Some(existing) = store::find_by_key(pool, &key)
        .await
        .context("job lookup failed")?
    {
        return already_ingested(pool, &key, existing, &incoming).await;
    }

    match store::insert(pool, &incoming).await {
        Ok(created) => {
            info!(job_id = created.id, title = %created.title, "job post created");
            Ok(IngestOutcome::Created(created))
        }
        Err(e) if is_unique_violation(&e) => {
            // Lost an insert race: another worker stored this key between our
            // lookup and our insert. Re-read and treat as a repeat sighting.
            debug!("duplicate insert race on job key, re-reading");
            let existing = store::find_by_key(pool, &key)
                .await
                .context("re-read after duplicate insert race failed")?
                .context("job row vanished after unique violation")?;
            already_ingested(pool, &key, existing, &incoming).await
        }
        Err(e) => Err(e).context("job insert failed"),
    }
}

/// What a repeat sighting of a stored row does.
#[derive(Debug, Clone, PartialEq)]
pub enum Resight {
    /// Strong-key repeat: the stored row stands as-is.
    Keep(JobPost),
    /// Weak-key repeat: the merged row to persist.
    Refresh(JobPost),
}

/// Pure repeat-sighting policy. Strong-key repeats are idempotent NO-OPs;
/// weak-key repeats refresh the bounded extracted-field subset.
pub fn resight(existing: JobPost, key: &JobKey<'_>, incoming: &IncomingJob) -> Resight {
    match key {
        JobKey::Strong { .. } => Resight::Keep(existing),
        JobKey::Weak { .. } => Resight::Refresh(merge_extracted_fields(existing, incoming)),
    }
}

/// Bounded merge for a weak-key repeat: only {salary, location, deadline,
/// format, work_time, industry}, and only where the incoming value is
/// non-null. Title, description, identity, and timestamps are never touched.
fn merge_extracted_fields(mut job: JobPost, incoming: &IncomingJob) -> JobPost {
    if incoming.salary.is_some() {
        job.salary = incoming.salary;
    }
    if incoming.location.is_some() {
        job.location = incoming.location.clone();
    }
    if incoming.deadline.is_some() {
        job.deadline = incoming.deadline;
    }
    if incoming.format.is_some() {
        job.format = incoming.format.clone();
    }
    if incoming.work_time.is_some() {
        job.work_time = incoming.work_time.clone();
    }
    if incoming.industry.is_some() {
        job.industry = incoming.industry.clone();
    }
    job
}

async fn already_ingested(
    pool: &PgPool,
    key: &JobKey<'_>,
    existing: JobPost,
    incoming: &IncomingJob,
) -> Result<IngestOutcome> {
    match resight(existing, key, incoming) {
        Resight::Keep(job) => {
            debug!(job_id = job.id, "job already ingested, no-op");
            Ok(IngestOutcome::Unchanged(job))
        }
        Resight::Refresh(merged) => {
            let updated = store::save_extracted_fields(pool, &merged)
                .await
                .context("job re-sighting update failed")?;
            info!(job_id = updated.id, "job post refreshed from re-sighting");
            Ok(IngestOutcome::Updated(updated))
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
