use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::recommend::client::JobRecommender;

/// Shared application state injected into all route handlers via Axum
/// extractors. Built once in `main`; there are no process-global clients.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable external recommender. HTTP-backed in production, mocked in
    /// tests.
    pub recommender: Arc<dyn JobRecommender>,
    pub config: Config,
}
