use sqlx::PgPool;
use tracing::info;

use crate::domain::{Budget, Expense, Log, Setting};
use crate::domain::entity::Entity;
use crate::store::StoreError;

/// Create the collection tables on startup if they do not exist yet.
pub async fn ensure_collections(pool: &PgPool) -> Result<(), StoreError> {
    let collections = [
        Budget::COLLECTION,
        Expense::COLLECTION,
        Log::COLLECTION,
        Setting::COLLECTION,
    ];

    for name in collections {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc JSONB NOT NULL)",
            name
        );
        sqlx::query(&sql).execute(pool).await?;
    }

    info!("Collection tables ready: {}", collections.join(", "));
    Ok(())
}
