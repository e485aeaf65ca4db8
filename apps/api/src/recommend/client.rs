//! External recommender client, the single network-bound step in the
//! recommendation path.
//!
//! The recommender service receives the full profile and job list as plain
//! JSON and answers with `[{"id", "reasons", "match_score"?}]`. Everything
//! about that call can fail (timeout, malformed body, non-list payload) and
//! every failure is recoverable by the caller's scoring fallback, so errors
//! here carry context but never abort a request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::job::JobPost;
use crate::models::profile::UserProfile;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("recommender returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed recommender response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("recommender call timed out after {0}s")]
    Timeout(u64),
}

/// One recommendation as returned by the external service. `match_score`
/// (1–5) is advisory and not required by the core contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRecommendation {
    pub id: i64,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub match_score: Option<u8>,
}

/// The recommender seam. `AppState` carries `Arc<dyn JobRecommender>` so the
/// HTTP implementation can be swapped for a mock in tests without touching
/// the ranking code.
#[async_trait]
pub trait JobRecommender: Send + Sync {
    async fn recommend(
        &self,
        profile: &UserProfile,
        jobs: &[JobPost],
    ) -> Result<Vec<LlmRecommendation>, RecommendError>;
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    profile: &'a UserProfile,
    jobs: &'a [JobPost],
}

/// reqwest-backed recommender client.
#[derive(Clone)]
pub struct HttpRecommender {
    client: Client,
    base_url: String,
}

impl HttpRecommender {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl JobRecommender for HttpRecommender {
    async fn recommend(
        &self,
        profile: &UserProfile,
        jobs: &[JobPost],
    ) -> Result<Vec<LlmRecommendation>, RecommendError> {
        let url = format!("{}/api/v1/recommendations", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RecommendRequest { profile, jobs })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecommendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Deserialize by hand so a non-list body surfaces as a parse error
        // rather than a reqwest decode error.
        let body = response.text().await?;
        let recommendations: Vec<LlmRecommendation> = serde_json::from_str(&body)?;
        Ok(recommendations)
    }
}
