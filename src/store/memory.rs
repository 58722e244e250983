//! In-memory `EntityStore` used by the service unit tests. Mirrors the
//! Postgres collection's merge and paging semantics; rows keep insertion
//! order so the natural order is deterministic.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entity::Entity;
use crate::store::{EntityStore, StoreError};

/// Clones share the same rows, so a test can keep a handle for inspection
/// after handing the store to a service.
pub struct MemCollection<T> {
    rows: Arc<Mutex<Vec<(String, Value)>>>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Clone for MemCollection<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Entity> MemCollection<T> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Raw document count, for asserting that failed operations left the
    /// collection untouched.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl<T: Entity> Default for MemCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for MemCollection<T> {
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|(row_id, _)| row_id == id)
            .map(|(_, doc)| serde_json::from_value(doc.clone()))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .map(|(_, doc)| serde_json::from_value(doc.clone()).map_err(StoreError::from))
            .collect()
    }

    async fn create(&self, mut entity: T) -> Result<T, StoreError> {
        if entity.id().is_empty() {
            entity.set_id(Uuid::new_v4().to_string());
        }
        let now = Utc::now();
        entity.set_created_at(now);
        entity.set_updated_at(now);

        let doc = serde_json::to_value(&entity)?;
        let mut rows = self.rows.lock().unwrap();
        rows.push((entity.id().to_string(), doc));
        Ok(entity)
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<T>, StoreError> {
        let mut merge = serde_json::to_value(patch)?;
        let updated = {
            let mut rows = self.rows.lock().unwrap();
            let Some((_, doc)) = rows.iter_mut().find(|(row_id, _)| row_id == id) else {
                return Ok(None);
            };
            if let (Value::Object(target), Value::Object(source)) = (doc, &mut merge) {
                source.remove("id");
                source.retain(|_, v| !v.is_null());
                source.insert("updated_at".to_string(), serde_json::to_value(Utc::now())?);
                for (key, value) in source.iter() {
                    target.insert(key.clone(), value.clone());
                }
            }
            rows.iter()
                .find(|(row_id, _)| row_id == id)
                .map(|(_, doc)| doc.clone())
        };
        updated
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(row_id, _)| row_id != id);
        Ok(rows.len() < before)
    }

    async fn get_paged(&self, page: u32, page_size: u32) -> Result<Vec<T>, StoreError> {
        let skip = page.saturating_sub(1) as usize * page_size as usize;
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .skip(skip)
            .take(page_size as usize)
            .map(|(_, doc)| serde_json::from_value(doc.clone()).map_err(StoreError::from))
            .collect()
    }
}
