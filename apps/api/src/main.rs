mod config;
mod db;
mod errors;
mod jobs;
mod matching;
mod models;
mod profile;
mod recommend;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{bootstrap_schema, create_pool};
use crate::jobs::retention::run_sweeper;
use crate::recommend::client::HttpRecommender;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("jobgram_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobgram API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and bootstrap the schema
    let pool = create_pool(&config.database_url).await?;
    bootstrap_schema(&pool).await?;

    // External recommender client, built once and passed by handle
    let recommender = Arc::new(HttpRecommender::new(
        config.recommender_url.clone(),
        config.recommender_timeout_secs,
    ));
    info!(
        "Recommender client initialized ({}, timeout {}s)",
        config.recommender_url, config.recommender_timeout_secs
    );

    // Retention sweeper: independent long-lived task, never joined
    tokio::spawn(run_sweeper(pool.clone()));

    // Build app state
    let state = AppState {
        db: pool,
        recommender,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
