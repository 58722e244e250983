use axum::{extract::Request, http::Method, middleware::Next, response::Response};

use crate::audit;

/// Records mutating requests to the audit trail. Reads are not audited, and
/// the emit is fire-and-forget, so this layer adds no latency to the request
/// path.
pub async fn audit_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let audited = method != Method::GET;

    if audited {
        audit::emit("RequestReceived", format!("{} {}", method, path));
    }

    let response = next.run(request).await;

    if audited {
        audit::emit(
            "RequestCompleted",
            format!("{} {} -> {}", method, path, response.status().as_u16()),
        );
    }

    response
}
