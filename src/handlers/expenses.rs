use axum::{
    extract::Path,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::domain::entity::EntityPatch;
use crate::domain::{Expense, ExpensePatch};
use crate::handlers::storage_unavailable;
use crate::middleware::AuthUser;
use crate::response::ServiceResponse;
use crate::services;

/// GET /api/expenses - list the caller's expenses
pub async fn list(Extension(user): Extension<AuthUser>) -> Response {
    match services::expenses().await {
        Ok(service) => service.get_all(&user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// GET /api/expenses/:id - fetch one expense by id
pub async fn get(Extension(user): Extension<AuthUser>, Path(id): Path<String>) -> Response {
    match services::expenses().await {
        Ok(service) => service.get_by_id(&id, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// POST /api/expenses - create an expense owned by the caller
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(expense): Json<Expense>,
) -> Response {
    match services::expenses().await {
        Ok(service) => service.create(expense, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// PUT /api/expenses/:id - merge-update an expense
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<ExpensePatch>,
) -> Response {
    if let Some(payload_id) = patch.id() {
        if payload_id != id {
            return ServiceResponse::<Expense>::error("URL ID does not match expense ID", 400)
                .into_response();
        }
    }

    match services::expenses().await {
        Ok(service) => service.update(&id, &patch, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}

/// DELETE /api/expenses/:id - delete an expense
pub async fn remove(Extension(user): Extension<AuthUser>, Path(id): Path<String>) -> Response {
    match services::expenses().await {
        Ok(service) => service.delete(&id, &user.sub).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}
