/// Periodic removal of expired upload targets
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct UploadCleanup {
    pool: SqlitePool,
    interval: Duration,
}

impl UploadCleanup {
    pub fn new(pool: SqlitePool, interval: Duration) -> Self {
        Self { pool, interval }
    }

    /// Run one sweep, returning how many targets were removed
    pub async fn run_once(&self) -> mus_core::Result<u64> {
        let purged = mus_storage::uploads::purge_expired(&self.pool, chrono::Utc::now()).await?;
        if purged > 0 {
            tracing::info!(purged, "Purged expired upload targets");
        }
        Ok(purged)
    }

    /// Start the sweep loop on the runtime
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(interval = ?self.interval, "Upload cleanup started");
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    tracing::error!("Upload cleanup failed: {}", e);
                }
            }
        })
    }
}
