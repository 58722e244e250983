use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::domain::Log;
use crate::handlers::storage_unavailable;
use crate::response::ServiceResponse;
use crate::services;

const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /api/logs - audit trail; pass ?page= (1-indexed) for a paged view
pub async fn list(Query(query): Query<PageQuery>) -> Response {
    let service = match services::logs().await {
        Ok(service) => service,
        Err(err) => return storage_unavailable(err),
    };

    match query.page {
        None => service.get_all().await.into_response(),
        Some(0) => {
            ServiceResponse::<Vec<Log>>::error("Page numbers start at 1", 400).into_response()
        }
        Some(page) => {
            let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
            if page_size == 0 || page_size > MAX_PAGE_SIZE {
                return ServiceResponse::<Vec<Log>>::error(
                    format!("Page size must be between 1 and {}", MAX_PAGE_SIZE),
                    400,
                )
                .into_response();
            }
            service.get_paged(page, page_size).await.into_response()
        }
    }
}

/// GET /api/logs/:id - fetch one audit entry
pub async fn get(Path(id): Path<String>) -> Response {
    match services::logs().await {
        Ok(service) => service.get_by_id(&id).await.into_response(),
        Err(err) => storage_unavailable(err),
    }
}
