use axum::{
    extract::Path,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::entity::EntityPatch;
use crate::domain::{Setting, SettingPatch};
use crate::handlers::storage_unavailable;
use crate::response::ServiceResponse;
use crate::services;

/// GET /api/settings - list all key/value settings
pub async fn list() -> Response {
    match services::settings().await {
        Ok(service) => service.get_all().await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// GET /api/settings/:id - fetch one setting
pub async fn get(Path(id): Path<String>) -> Response {
    match services::settings().await {
        Ok(service) => service.get_by_id(&id).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// POST /api/settings - create a setting
pub async fn create(Json(setting): Json<Setting>) -> Response {
    match services::settings().await {
        Ok(service) => service.create(setting).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// PUT /api/settings/:id - merge-update a setting
pub async fn update(Path(id): Path<String>, Json(patch): Json<SettingPatch>) -> Response {
    if let Some(payload_id) = patch.id() {
        if payload_id != id {
            return ServiceResponse::<Setting>::error("URL ID does not match setting ID", 400)
                .into_response();
        }
    }

    match services::settings().await {
        Ok(service) => service.update(&id, &patch).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// DELETE /api/settings/:id - delete a setting
pub async fn remove(Path(id): Path<String>) -> Response {
    match services::settings().await {
        Ok(service) => service.delete(&id).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}
