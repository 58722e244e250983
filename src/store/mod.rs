use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entity::Entity;

pub mod collection;
pub mod manager;
pub mod schema;

#[cfg(test)]
pub mod memory;

pub use collection::PgCollection;
pub use manager::StoreManager;

/// Errors surfaced by the storage layer. Transport faults propagate to the
/// service untouched; the service decides what crosses the API boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Persistence operations for one entity kind. One logical collection per
/// kind; all consistency is delegated to the backing engine's per-row
/// atomicity.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Point lookup. Absent rows are `Ok(None)`, not an error.
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// Unbounded full scan, storage-determined order. Acceptable at current
    /// collection sizes only.
    async fn get_all(&self) -> Result<Vec<T>, StoreError>;

    /// Fetches everything and applies the predicate in process memory.
    async fn get_by_filter<F>(&self, predicate: F) -> Result<Vec<T>, StoreError>
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        let all = self.get_all().await?;
        Ok(all.into_iter().filter(|e| predicate(e)).collect())
    }

    /// Persists the entity, assigning a fresh id if it has none and stamping
    /// both timestamps to now. Returns the stored row.
    async fn create(&self, entity: T) -> Result<T, StoreError>;

    /// Merges the patch into the row addressed by `id`, always overwriting
    /// `updated_at`. Fields absent from the patch keep their stored values.
    /// Returns `None` when no row matched.
    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<T>, StoreError>;

    /// Hard delete. Returns whether a row was actually removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// 1-indexed page over the store's natural order; skip is
    /// `(page - 1) * page_size`. Order is only stable in the absence of
    /// concurrent writes.
    async fn get_paged(&self, page: u32, page_size: u32) -> Result<Vec<T>, StoreError>;
}
