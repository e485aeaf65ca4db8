use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the external LLM recommender service.
    pub recommender_url: String,
    /// Upper bound on one recommender call; on expiry the scoring fallback
    /// runs immediately.
    pub recommender_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            recommender_url: require_env("RECOMMENDER_URL")?,
            recommender_timeout_secs: std::env::var("RECOMMENDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "45".to_string())
                .parse::<u64>()
                .context("RECOMMENDER_TIMEOUT_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
