use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entity::Entity;
use crate::store::{EntityStore, StoreError};

/// Document-style collection backed by a Postgres table of the shape
/// `(id TEXT PRIMARY KEY, doc JSONB NOT NULL)`. Entities serialize whole into
/// `doc`; merge-updates use jsonb concatenation so untouched fields keep
/// their stored values.
pub struct PgCollection<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Entity> PgCollection<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Collection names are interpolated into SQL, so only identifier
    /// characters are accepted.
    fn table() -> Result<&'static str, StoreError> {
        let name = T::COLLECTION;
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(name)
        } else {
            Err(StoreError::InvalidCollection(name.to_string()))
        }
    }

    fn decode(doc: Value) -> Result<T, StoreError> {
        Ok(serde_json::from_value(doc)?)
    }

    /// Serialize a patch for jsonb merge: drop the payload id, drop nulls
    /// (null fields never clear stored values) and stamp `updated_at`.
    fn merge_doc(patch: &T::Patch) -> Result<Value, StoreError> {
        let mut doc = serde_json::to_value(patch)?;
        if let Value::Object(map) = &mut doc {
            map.remove("id");
            map.retain(|_, v| !v.is_null());
            map.insert("updated_at".to_string(), serde_json::to_value(Utc::now())?);
        }
        Ok(doc)
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for PgCollection<T> {
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", Self::table()?);
        let row: Option<(Value,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        debug!(collection = T::COLLECTION, id, found = row.is_some(), "point lookup");
        row.map(|(doc,)| Self::decode(doc)).transpose()
    }

    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!("SELECT doc FROM {}", Self::table()?);
        let rows: Vec<(Value,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        debug!(collection = T::COLLECTION, count = rows.len(), "full scan");
        rows.into_iter().map(|(doc,)| Self::decode(doc)).collect()
    }

    async fn create(&self, mut entity: T) -> Result<T, StoreError> {
        if entity.id().is_empty() {
            entity.set_id(Uuid::new_v4().to_string());
        }
        let now = Utc::now();
        entity.set_created_at(now);
        entity.set_updated_at(now);

        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", Self::table()?);
        let doc = serde_json::to_value(&entity)?;
        sqlx::query(&sql)
            .bind(entity.id())
            .bind(&doc)
            .execute(&self.pool)
            .await?;

        debug!(collection = T::COLLECTION, id = entity.id(), "row inserted");
        Ok(entity)
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<T>, StoreError> {
        let merge = Self::merge_doc(patch)?;
        let sql = format!(
            "UPDATE {} SET doc = doc || $2 WHERE id = $1 RETURNING doc",
            Self::table()?
        );
        let row: Option<(Value,)> = sqlx::query_as(&sql)
            .bind(id)
            .bind(&merge)
            .fetch_optional(&self.pool)
            .await?;

        debug!(collection = T::COLLECTION, id, matched = row.is_some(), "merge update");
        row.map(|(doc,)| Self::decode(doc)).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::table()?);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        let deleted = result.rows_affected() > 0;
        debug!(collection = T::COLLECTION, id, deleted, "row delete");
        Ok(deleted)
    }

    async fn get_paged(&self, page: u32, page_size: u32) -> Result<Vec<T>, StoreError> {
        // 1-indexed pages; no ORDER BY, so ordering is whatever the engine
        // returns and only stable without concurrent writes
        let skip = i64::from(page.saturating_sub(1)) * i64::from(page_size);
        let sql = format!("SELECT doc FROM {} OFFSET $1 LIMIT $2", Self::table()?);
        let rows: Vec<(Value,)> = sqlx::query_as(&sql)
            .bind(skip)
            .bind(i64::from(page_size))
            .fetch_all(&self.pool)
            .await?;

        debug!(
            collection = T::COLLECTION,
            page,
            page_size,
            count = rows.len(),
            "paged scan"
        );
        rows.into_iter().map(|(doc,)| Self::decode(doc)).collect()
    }
}
