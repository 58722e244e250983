//! Router-level authentication checks. These drive the assembled app
//! in-process and only touch paths that never reach the database.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let app = bolso_api::server::app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["success"], serde_json::json!(true));
    assert_eq!(body["data"]["name"], serde_json::json!("Bolso API"));
    Ok(())
}

#[tokio::test]
async fn missing_bearer_is_rejected_with_envelope() -> Result<()> {
    let app = bolso_api::server::app();

    let response = app
        .oneshot(Request::builder().uri("/api/budgets").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await?;
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["status_code"], serde_json::json!(401));
    assert_eq!(
        body["message"],
        serde_json::json!("Missing Authorization header")
    );
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() -> Result<()> {
    let app = bolso_api::server::app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/expenses")
                .header("authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await?;
    assert_eq!(body["success"], serde_json::json!(false));
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let app = bolso_api::server::app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/logs")
                .header("authorization", "Bearer not.a.jwt")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn unauthenticated_mutation_is_rejected_too() -> Result<()> {
    let app = bolso_api::server::app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/budgets")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"Groceries","amount":"500"}"#))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
