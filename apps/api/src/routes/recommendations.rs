use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::store;
use crate::profile::store as profile_store;
use crate::recommend::ranker::{recommend, RankedJob};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RecommendQuery {
    pub user_id: i64,
}

/// GET /api/v1/recommendations?user_id=...
/// Ranked jobs for a profile, best first, at most 30. Always answers: the
/// scoring fallback covers recommender outages.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendQuery>,
) -> Result<Json<Vec<RankedJob>>, AppError> {
    let profile = profile_store::get_by_user_id(&state.db, params.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Profile not found for user {}", params.user_id))
        })?;

    let jobs = store::list_all(&state.db).await?;
    let timeout = Duration::from_secs(state.config.recommender_timeout_secs);

    let ranked = recommend(state.recommender.as_ref(), timeout, &profile, jobs).await;
    Ok(Json(ranked))
}
