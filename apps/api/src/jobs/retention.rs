//! Retention sweeper: purges job posts older than the retention window.
//!
//! Spawned once at startup and never joined. Each cycle deletes in one
//! transactional unit, then sleeps; a failed cycle (store down, network
//! blip) is logged and skipped, and the next cycle still fires on schedule.

use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};

use crate::jobs::store;

/// Jobs older than this are purged.
pub const RETENTION_DAYS: i64 = 30;
/// One sweep per day.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// The oldest publish timestamp still retained at `now`.
pub fn retention_cutoff(now: NaiveDateTime) -> NaiveDateTime {
    now - chrono::Duration::days(RETENTION_DAYS)
}

/// Runs the sweep loop forever. Intended for `tokio::spawn` at startup.
pub async fn run_sweeper(pool: PgPool) {
    info!(
        retention_days = RETENTION_DAYS,
        "retention sweeper started"
    );
    loop {
        match sweep(&pool).await {
            Ok(0) => info!("retention sweep: nothing to purge"),
            Ok(purged) => info!(purged, "retention sweep: purged expired job posts"),
            Err(e) => error!("retention sweep failed, will retry next cycle: {e:#}"),
        }
        tokio::time::sleep(SWEEP_PERIOD).await;
    }
}

async fn sweep(pool: &PgPool) -> Result<u64> {
    let cutoff = retention_cutoff(Utc::now().naive_utc());
    Ok(store::delete_older_than(pool, cutoff).await?)
}
