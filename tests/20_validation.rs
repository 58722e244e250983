//! Path/payload id agreement on PUT. The mismatch check runs before any
//! storage access, so these drive the assembled app in-process with a real
//! bearer token and no database.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use bolso_api::auth::{encode_jwt, Claims};

const TEST_SECRET: &str = "validation-test-secret";

/// Mint a valid bearer token. The secret env var is set before the config
/// singleton is first touched, so the middleware validates against the same
/// secret the token was signed with.
fn bearer() -> Result<String> {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let claims = Claims::new("u1".to_string(), None);
    Ok(format!("Bearer {}", encode_jwt(&claims, TEST_SECRET)?))
}

async fn put_json(uri: &str, body: &str) -> Result<axum::response::Response> {
    let app = bolso_api::server::app();
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("authorization", bearer()?)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await?;
    Ok(response)
}

async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn budget_update_rejects_mismatched_payload_id() -> Result<()> {
    let response = put_json("/api/budgets/abc", r#"{"id":"different-id","name":"X"}"#).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["status_code"], serde_json::json!(400));
    assert_eq!(
        body["message"],
        serde_json::json!("URL ID does not match budget ID")
    );
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn expense_update_rejects_mismatched_payload_id() -> Result<()> {
    let response = put_json(
        "/api/expenses/abc",
        r#"{"id":"different-id","name":"Rent"}"#,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(
        body["message"],
        serde_json::json!("URL ID does not match expense ID")
    );
    Ok(())
}

#[tokio::test]
async fn setting_update_rejects_mismatched_payload_id() -> Result<()> {
    let response = put_json("/api/settings/abc", r#"{"id":"different-id","value":"v"}"#).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(
        body["message"],
        serde_json::json!("URL ID does not match setting ID")
    );
    Ok(())
}
