use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::response::ServiceResponse;
use crate::store::StoreError;

pub mod budgets;
pub mod email;
pub mod expenses;
pub mod logs;
pub mod settings;

/// Pool acquisition failed before the service could run; same generic 500 as
/// any other storage fault.
pub(crate) fn storage_unavailable(err: StoreError) -> Response {
    error!("Storage unavailable: {}", err);
    ServiceResponse::<()>::internal_error().into_response()
}
