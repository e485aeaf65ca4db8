use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's profile: identity fields, résumé-derived fields, and the
/// preferences driving recommendations.
///
/// The résumé-derived columns (`skills`, `education`, ...) hold whatever the
/// résumé parser produced (a plain string, a JSON-encoded list, or a JSON
/// object) and are only interpreted through the field normalizer. Owned
/// one-to-one by a user in the surrounding account subsystem; never deleted
/// here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,

    // Identity
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub citizenship: Option<String>,
    pub address: Option<String>,

    // Résumé-derived
    pub resume_text: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub experience_level: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub interests: Option<String>,
    pub achievements: Option<String>,

    // Preferences
    pub desired_position: Option<String>,
    pub desired_salary: Option<i32>,
    pub desired_city: Option<String>,
    pub desired_format: Option<String>,
    pub desired_work_time: Option<String>,
    pub industries: Option<String>,

    pub updated_at: NaiveDateTime,
}

/// Direct profile edit payload: only supplied fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub citizenship: Option<String>,
    pub address: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub experience_level: Option<String>,
    pub skills: Option<String>,
    pub languages: Option<String>,
    pub interests: Option<String>,
    pub achievements: Option<String>,
    pub desired_position: Option<String>,
    pub desired_salary: Option<i32>,
    pub desired_city: Option<String>,
    pub desired_format: Option<String>,
    pub desired_work_time: Option<String>,
    pub industries: Option<String>,
}
