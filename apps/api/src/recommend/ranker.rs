//! Recommendation ranking: orchestrates the external recommender with the
//! deterministic scoring fallback.
//!
//! Primary path: ask the external recommender, validate its answer against
//! the supplied jobs (ids we never sent are silently dropped), truncate.
//! Fallback path: score every job locally, drop zero scores, sort descending
//! with stable ties, truncate. Any primary-path failure, timeout included,
//! falls through to the fallback; the caller always gets a ranked list.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::matching::score::{relevance_score, ProfileSignals};
use crate::models::job::JobPost;
use crate::models::profile::UserProfile;
use crate::recommend::client::JobRecommender;

/// Hard cap on the size of a recommendation response.
pub const MAX_RECOMMENDATIONS: usize = 30;

/// A job paired with the reasons it was recommended.
#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub job: JobPost,
    pub reasons: Vec<String>,
}

/// Produces up to [`MAX_RECOMMENDATIONS`] jobs for a profile, best first.
///
/// The external call is time-bounded: a hung recommender cannot stall the
/// fallback indefinitely.
pub async fn recommend(
    recommender: &dyn JobRecommender,
    timeout: Duration,
    profile: &UserProfile,
    jobs: Vec<JobPost>,
) -> Vec<RankedJob> {
    let primary = tokio::time::timeout(timeout, recommender.recommend(profile, &jobs)).await;

    match primary {
        Ok(Ok(recommendations)) => {
            debug!(
                count = recommendations.len(),
                "external recommender answered"
            );
            resolve_recommendations(recommendations, jobs)
        }
        Ok(Err(e)) => {
            warn!("external recommender failed, using scoring fallback: {e}");
            fallback_rank(profile, jobs)
        }
        Err(_) => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "external recommender timed out, using scoring fallback"
            );
            fallback_rank(profile, jobs)
        }
    }
}

/// Maps recommender output back onto the supplied jobs. Ids that do not
/// resolve are dropped without error; the recommender is not trusted to
/// invent jobs.
fn resolve_recommendations(
    recommendations: Vec<crate::recommend::client::LlmRecommendation>,
    jobs: Vec<JobPost>,
) -> Vec<RankedJob> {
    let mut by_id: HashMap<i64, JobPost> = jobs.into_iter().map(|j| (j.id, j)).collect();

    recommendations
        .into_iter()
        .filter_map(|rec| {
            by_id.remove(&rec.id).map(|job| RankedJob {
                job,
                reasons: rec.reasons,
            })
        })
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

/// Deterministic fallback: relevance-scores every job, keeps positive scores
/// only, sorts by descending score. The sort is stable, so equal scores keep
/// their original input order.
pub fn fallback_rank(profile: &UserProfile, jobs: Vec<JobPost>) -> Vec<RankedJob> {
    let signals = ProfileSignals::from_profile(profile);

    let mut scored: Vec<(u32, RankedJob)> = jobs
        .into_iter()
        .filter_map(|job| {
            let (score, reasons) = relevance_score(&signals, &job);
            (score > 0).then_some((score, RankedJob { job, reasons }))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|(_, ranked)| ranked)
        .collect()
}
