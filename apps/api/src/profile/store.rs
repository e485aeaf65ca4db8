//! Profile queries. Profiles are created and deleted by the surrounding
//! account subsystem; this core only reads and mutates field content.

use sqlx::PgPool;

use crate::models::profile::{ProfilePatch, UserProfile};
use crate::profile::update::ResumeFieldUpdate;

pub async fn get_by_user_id(
    pool: &PgPool,
    user_id: i64,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Direct edit: applies only the supplied fields. Returns `None` if the
/// profile does not exist.
pub async fn apply_patch(
    pool: &PgPool,
    user_id: i64,
    patch: &ProfilePatch,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE user_profiles
        SET full_name         = COALESCE($2, full_name),
            gender            = COALESCE($3, gender),
            phone_number      = COALESCE($4, phone_number),
            email             = COALESCE($5, email),
            citizenship       = COALESCE($6, citizenship),
            address           = COALESCE($7, address),
            education         = COALESCE($8, education),
            experience        = COALESCE($9, experience),
            experience_level  = COALESCE($10, experience_level),
            skills            = COALESCE($11, skills),
            languages         = COALESCE($12, languages),
            interests         = COALESCE($13, interests),
            achievements      = COALESCE($14, achievements),
            desired_position  = COALESCE($15, desired_position),
            desired_salary    = COALESCE($16, desired_salary),
            desired_city      = COALESCE($17, desired_city),
            desired_format    = COALESCE($18, desired_format),
            desired_work_time = COALESCE($19, desired_work_time),
            industries        = COALESCE($20, industries),
            updated_at        = (now() AT TIME ZONE 'utc')
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&patch.full_name)
    .bind(&patch.gender)
    .bind(&patch.phone_number)
    .bind(&patch.email)
    .bind(&patch.citizenship)
    .bind(&patch.address)
    .bind(&patch.education)
    .bind(&patch.experience)
    .bind(&patch.experience_level)
    .bind(&patch.skills)
    .bind(&patch.languages)
    .bind(&patch.interests)
    .bind(&patch.achievements)
    .bind(&patch.desired_position)
    .bind(patch.desired_salary)
    .bind(&patch.desired_city)
    .bind(&patch.desired_format)
    .bind(&patch.desired_work_time)
    .bind(&patch.industries)
    .fetch_optional(pool)
    .await
}

/// Applies a sanitized résumé update (see
/// [`ResumeFieldUpdate`](crate::profile::update::ResumeFieldUpdate)).
/// Returns `None` if the profile does not exist.
pub async fn apply_resume_update(
    pool: &PgPool,
    user_id: i64,
    update: &ResumeFieldUpdate,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE user_profiles
        SET full_name         = COALESCE($2, full_name),
            gender            = COALESCE($3, gender),
            citizenship       = COALESCE($4, citizenship),
            address           = COALESCE($5, address),
            education         = COALESCE($6, education),
            experience        = COALESCE($7, experience),
            experience_level  = COALESCE($8, experience_level),
            skills            = COALESCE($9, skills),
            languages         = COALESCE($10, languages),
            interests         = COALESCE($11, interests),
            achievements      = COALESCE($12, achievements),
            desired_position  = COALESCE($13, desired_position),
            desired_salary    = COALESCE($14, desired_salary),
            desired_city      = COALESCE($15, desired_city),
            desired_format    = COALESCE($16, desired_format),
            desired_work_time = COALESCE($17, desired_work_time),
            industries        = COALESCE($18, industries),
            resume_text       = COALESCE($19, resume_text),
            updated_at        = (now() AT TIME ZONE 'utc')
        WHERE user_id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&update.full_name)
    .bind(&update.gender)
    .bind(&update.citizenship)
    .bind(&update.address)
    .bind(&update.education)
    .bind(&update.experience)
    .bind(&update.experience_level)
    .bind(&update.skills)
    .bind(&update.languages)
    .bind(&update.interests)
    .bind(&update.achievements)
    .bind(&update.desired_position)
    .bind(update.desired_salary)
    .bind(&update.desired_city)
    .bind(&update.desired_format)
    .bind(&update.desired_work_time)
    .bind(&update.industries)
    .bind(&update.resume_text)
    .fetch_optional(pool)
    .await
}
