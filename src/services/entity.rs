use chrono::Utc;
use std::marker::PhantomData;
use tracing::{error, info, warn};

use crate::domain::entity::{Entity, Owned};
use crate::response::ServiceResponse;
use crate::store::{EntityStore, StoreError};

fn internal<T>(kind: &str, op: &str, err: &StoreError) -> ServiceResponse<T> {
    // Nothing about the storage fault crosses the service boundary
    error!("Error during {} {}: {}", kind, op, err);
    ServiceResponse::internal_error()
}

/// Authorization and business-rule layer for kinds owned by a subject.
/// Every operation takes the verified caller subject; rows belonging to
/// anyone else are reported as absent.
pub struct OwnedEntityService<S, T> {
    store: S,
    _phantom: PhantomData<T>,
}

impl<S, T> OwnedEntityService<S, T>
where
    S: EntityStore<T>,
    T: Entity + Owned,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn get_by_id(&self, id: &str, subject: &str) -> ServiceResponse<T> {
        info!("Fetching {} with ID: {}", T::COLLECTION, id);
        match self.store.get_by_id(id).await {
            Ok(Some(entity)) if entity.owner_id() == subject => ServiceResponse::ok(entity),
            Ok(Some(_)) => ServiceResponse::not_found(id),
            Ok(None) => {
                warn!("{} with ID {} not found", T::COLLECTION, id);
                ServiceResponse::not_found(id)
            }
            Err(err) => internal(T::COLLECTION, "fetch", &err),
        }
    }

    pub async fn get_all(&self, subject: &str) -> ServiceResponse<Vec<T>> {
        info!("Fetching all {} for subject", T::COLLECTION);
        let subject = subject.to_string();
        match self
            .store
            .get_by_filter(move |entity: &T| entity.owner_id() == subject)
            .await
        {
            Ok(entities) => ServiceResponse::ok(entities),
            Err(err) => internal(T::COLLECTION, "list", &err),
        }
    }

    /// Owner is always the caller; whatever the payload carried for it is
    /// discarded. Both timestamps are stamped here.
    pub async fn create(&self, mut entity: T, subject: &str) -> ServiceResponse<T> {
        info!("Creating {} for subject", T::COLLECTION);
        entity.set_owner_id(subject.to_string());
        let now = Utc::now();
        entity.set_created_at(now);
        entity.set_updated_at(now);

        match self.store.create(entity).await {
            Ok(created) => {
                info!("{} created successfully. ID: {}", T::COLLECTION, created.id());
                ServiceResponse::created(created)
            }
            Err(err) => internal(T::COLLECTION, "create", &err),
        }
    }

    /// Existence and ownership are checked before the merge; the patch type
    /// cannot carry owner or `created_at`, so both survive the update
    /// untouched regardless of what the client sent.
    pub async fn update(&self, id: &str, patch: &T::Patch, subject: &str) -> ServiceResponse<T> {
        info!("Updating {} with ID: {}", T::COLLECTION, id);
        let existing = match self.store.get_by_id(id).await {
            Ok(Some(entity)) if entity.owner_id() == subject => entity,
            Ok(Some(_)) => return ServiceResponse::not_found(id),
            Ok(None) => {
                warn!("{} with ID {} not found for update", T::COLLECTION, id);
                return ServiceResponse::not_found(id);
            }
            Err(err) => return internal(T::COLLECTION, "update", &err),
        };

        match self.store.update(existing.id(), patch).await {
            Ok(Some(updated)) => {
                info!("{} updated successfully. ID: {}", T::COLLECTION, id);
                ServiceResponse::ok_with_message(updated, "Entity updated successfully")
            }
            Ok(None) => {
                // Existence was just confirmed; only a concurrent delete
                // between the check and the merge lands here
                error!("{} with ID {} vanished during update", T::COLLECTION, id);
                ServiceResponse::internal_error()
            }
            Err(err) => internal(T::COLLECTION, "update", &err),
        }
    }

    pub async fn delete(&self, id: &str, subject: &str) -> ServiceResponse<bool> {
        info!("Deleting {} with ID: {}", T::COLLECTION, id);
        match self.store.get_by_id(id).await {
            Ok(Some(entity)) if entity.owner_id() == subject => {}
            Ok(Some(_)) => return ServiceResponse::not_found(id),
            Ok(None) => {
                warn!("{} with ID {} not found for deletion", T::COLLECTION, id);
                return ServiceResponse::not_found(id);
            }
            Err(err) => return internal(T::COLLECTION, "delete", &err),
        }

        match self.store.delete(id).await {
            Ok(true) => {
                info!("{} deleted successfully. ID: {}", T::COLLECTION, id);
                ServiceResponse::ok_with_message(true, "Entity deleted successfully")
            }
            Ok(false) => {
                error!("{} with ID {} vanished during delete", T::COLLECTION, id);
                ServiceResponse::error("Failed to delete entity", 500)
            }
            Err(err) => internal(T::COLLECTION, "delete", &err),
        }
    }
}

/// Same orchestration for global kinds (logs, settings): no owner concept,
/// so the caller's subject plays no part in filtering.
pub struct EntityService<S, T> {
    store: S,
    _phantom: PhantomData<T>,
}

impl<S, T> EntityService<S, T>
where
    S: EntityStore<T>,
    T: Entity,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResponse<T> {
        info!("Fetching {} with ID: {}", T::COLLECTION, id);
        match self.store.get_by_id(id).await {
            Ok(Some(entity)) => ServiceResponse::ok(entity),
            Ok(None) => {
                warn!("{} with ID {} not found", T::COLLECTION, id);
                ServiceResponse::not_found(id)
            }
            Err(err) => internal(T::COLLECTION, "fetch", &err),
        }
    }

    pub async fn get_all(&self) -> ServiceResponse<Vec<T>> {
        info!("Fetching all {}", T::COLLECTION);
        match self.store.get_all().await {
            Ok(entities) => ServiceResponse::ok(entities),
            Err(err) => internal(T::COLLECTION, "list", &err),
        }
    }

    pub async fn get_paged(&self, page: u32, page_size: u32) -> ServiceResponse<Vec<T>> {
        info!("Fetching {} page {} (size {})", T::COLLECTION, page, page_size);
        match self.store.get_paged(page, page_size).await {
            Ok(entities) => ServiceResponse::ok(entities),
            Err(err) => internal(T::COLLECTION, "paged list", &err),
        }
    }

    pub async fn create(&self, mut entity: T) -> ServiceResponse<T> {
        info!("Creating {}", T::COLLECTION);
        let now = Utc::now();
        entity.set_created_at(now);
        entity.set_updated_at(now);

        match self.store.create(entity).await {
            Ok(created) => {
                info!("{} created successfully. ID: {}", T::COLLECTION, created.id());
                ServiceResponse::created(created)
            }
            Err(err) => internal(T::COLLECTION, "create", &err),
        }
    }

    pub async fn update(&self, id: &str, patch: &T::Patch) -> ServiceResponse<T> {
        info!("Updating {} with ID: {}", T::COLLECTION, id);
        match self.store.get_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!("{} with ID {} not found for update", T::COLLECTION, id);
                return ServiceResponse::not_found(id);
            }
            Err(err) => return internal(T::COLLECTION, "update", &err),
        }

        match self.store.update(id, patch).await {
            Ok(Some(updated)) => {
                ServiceResponse::ok_with_message(updated, "Entity updated successfully")
            }
            Ok(None) => {
                error!("{} with ID {} vanished during update", T::COLLECTION, id);
                ServiceResponse::internal_error()
            }
            Err(err) => internal(T::COLLECTION, "update", &err),
        }
    }

    pub async fn delete(&self, id: &str) -> ServiceResponse<bool> {
        info!("Deleting {} with ID: {}", T::COLLECTION, id);
        match self.store.get_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!("{} with ID {} not found for deletion", T::COLLECTION, id);
                return ServiceResponse::not_found(id);
            }
            Err(err) => return internal(T::COLLECTION, "delete", &err),
        }

        match self.store.delete(id).await {
            Ok(true) => ServiceResponse::ok_with_message(true, "Entity deleted successfully"),
            Ok(false) => {
                error!("{} with ID {} vanished during delete", T::COLLECTION, id);
                ServiceResponse::error("Failed to delete entity", 500)
            }
            Err(err) => internal(T::COLLECTION, "delete", &err),
        }
    }
}
