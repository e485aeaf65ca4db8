pub mod health;
pub mod jobs;
pub mod profile;
pub mod recommendations;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handle_ingest_job).get(jobs::handle_list_jobs),
        )
        .route("/api/v1/jobs/search", get(jobs::handle_search_jobs))
        // Profile
        .route(
            "/api/v1/profile/:user_id",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        .route(
            "/api/v1/profile/:user_id/resume-fields",
            post(profile::handle_apply_resume_fields),
        )
        // Recommendations
        .route(
            "/api/v1/recommendations",
            get(recommendations::handle_recommendations),
        )
        .with_state(state)
}
