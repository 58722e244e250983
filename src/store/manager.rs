use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use crate::config;
use crate::store::StoreError;

/// Process-wide connection pool, created lazily from DATABASE_URL and shared
/// read/write across all concurrent requests.
pub struct StoreManager {
    pool: Arc<RwLock<Option<PgPool>>>,
}

impl StoreManager {
    fn instance() -> &'static StoreManager {
        use std::sync::OnceLock;
        static INSTANCE: OnceLock<StoreManager> = OnceLock::new();
        INSTANCE.get_or_init(|| StoreManager {
            pool: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the shared pool, connecting on first use.
    pub async fn pool() -> Result<PgPool, StoreError> {
        Self::instance().get_pool().await
    }

    async fn get_pool(&self) -> Result<PgPool, StoreError> {
        // Fast path: try read lock
        {
            let pool = self.pool.read().await;
            if let Some(pool) = pool.as_ref() {
                return Ok(pool.clone());
            }
        }

        let url = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

        let db = &config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(db.max_connections)
            .acquire_timeout(Duration::from_secs(db.connection_timeout))
            .connect(&url)
            .await?;

        {
            let mut slot = self.pool.write().await;
            if let Some(existing) = slot.as_ref() {
                // Another request connected first; keep the winner
                return Ok(existing.clone());
            }
            *slot = Some(pool.clone());
        }

        info!("Created database pool");
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity.
    pub async fn health_check() -> Result<(), StoreError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown).
    pub async fn close() {
        let manager = Self::instance();
        let mut slot = manager.pool.write().await;
        if let Some(pool) = slot.take() {
            pool.close().await;
            info!("Closed database pool");
        }
    }
}
