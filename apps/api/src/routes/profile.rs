use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::{ProfilePatch, UserProfile};
use crate::profile::store;
use crate::profile::update::ResumeFieldUpdate;
use crate::state::AppState;

/// GET /api/v1/profile/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserProfile>, AppError> {
    store::get_by_user_id(&state.db, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile not found for user {user_id}")))
}

/// PUT /api/v1/profile/:user_id
/// Direct edit: applies only the supplied fields.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<UserProfile>, AppError> {
    store::apply_patch(&state.db, user_id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile not found for user {user_id}")))
}

#[derive(Deserialize)]
pub struct ResumeFieldsRequest {
    /// `field name → value` map from the résumé-parsing collaborator.
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// Raw extracted document text, if the caller wants it stored.
    #[serde(default)]
    pub resume_text: Option<String>,
}

/// POST /api/v1/profile/:user_id/resume-fields
/// Applies LLM-parsed résumé fields to the profile. Junk placeholder values
/// are skipped per field; see `profile::update`.
pub async fn handle_apply_resume_fields(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<ResumeFieldsRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let update = ResumeFieldUpdate::from_parsed(&req.fields, req.resume_text);
    store::apply_resume_update(&state.db, user_id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile not found for user {user_id}")))
}
