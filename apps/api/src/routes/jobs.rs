use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::ingest::{ingest_job, IngestOutcome};
use crate::jobs::store;
use crate::models::job::{IncomingJob, JobPost};
use crate::state::AppState;

#[derive(Serialize)]
pub struct IngestResponse {
    pub outcome: &'static str,
    pub job: JobPost,
}

/// POST /api/v1/jobs
/// Ingests one scraped job record from the Telegram collector.
pub async fn handle_ingest_job(
    State(state): State<AppState>,
    Json(incoming): Json<IncomingJob>,
) -> Result<Json<IngestResponse>, AppError> {
    if incoming.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }

    let outcome = ingest_job(&state.db, incoming).await?;
    let (label, job) = match outcome {
        IngestOutcome::Created(job) => ("created", job),
        IngestOutcome::Updated(job) => ("updated", job),
        IngestOutcome::Unchanged(job) => ("unchanged", job),
    };
    Ok(Json(IngestResponse {
        outcome: label,
        job,
    }))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPost>>, AppError> {
    Ok(Json(store::list_all(&state.db).await?))
}

/// GET /api/v1/jobs/search
/// Filtered listing: minimum salary plus case-insensitive substring matches
/// on industry, title, format, and location. Absent filters match everything.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(filters): Query<store::JobFilters>,
) -> Result<Json<Vec<JobPost>>, AppError> {
    Ok(Json(store::search(&state.db, &filters).await?))
}
