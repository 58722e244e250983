use axum::{
    extract::Path,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::domain::entity::EntityPatch;
use crate::domain::{Budget, BudgetPatch};
use crate::handlers::storage_unavailable;
use crate::middleware::AuthUser;
use crate::response::ServiceResponse;
use crate::services;

/// GET /api/budgets - list the caller's budgets
pub async fn list(Extension(user): Extension<AuthUser>) -> Response {
    match services::budgets().await {
        Ok(service) => service.get_all(&user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// GET /api/budgets/:id - fetch one budget by id
pub async fn get(Extension(user): Extension<AuthUser>, Path(id): Path<String>) -> Response {
    match services::budgets().await {
        Ok(service) => service.get_by_id(&id, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// POST /api/budgets - create a budget owned by the caller
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(budget): Json<Budget>,
) -> Response {
    match services::budgets().await {
        Ok(service) => service.create(budget, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// PUT /api/budgets/:id - merge-update a budget
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<BudgetPatch>,
) -> Response {
    if let Some(payload_id) = patch.id() {
        if payload_id != id {
            return ServiceResponse::<Budget>::error("URL ID does not match budget ID", 400)
                .into_response();
        }
    }

    match services::budgets().await {
        Ok(service) => service.update(&id, &patch, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// DELETE /api/budgets/:id - delete a budget
pub async fn remove(Extension(user): Extension<AuthUser>, Path(id): Path<String>) -> Response {
    match services::budgets().await {
        Ok(service) => service.delete(&id, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}
