use axum::{middleware::from_fn, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{budgets, email, expenses, logs, settings};
use crate::middleware::{audit_middleware, jwt_auth_middleware};
use crate::store::StoreManager;

pub fn app() -> Router {
    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected API
        .merge(api_routes());

    if config::config().security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router {
    Router::new()
        .route("/api/budgets", get(budgets::list).post(budgets::create))
        .route(
            "/api/budgets/:id",
            get(budgets::get).put(budgets::update).delete(budgets::remove),
        )
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/:id",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route("/api/logs", get(logs::list))
        .route("/api/logs/:id", get(logs::get))
        .route("/api/settings", get(settings::list).post(settings::create))
        .route(
            "/api/settings/:id",
            get(settings::get)
                .put(settings::update)
                .delete(settings::remove),
        )
        .route("/api/email/send", axum::routing::post(email::send))
        // Auth runs first, audit sees only authenticated traffic
        .layer(from_fn(audit_middleware))
        .layer(from_fn(jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Bolso API",
            "version": version,
            "description": "Personal finance tracking backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "budgets": "/api/budgets[/:id] (protected)",
                "expenses": "/api/expenses[/:id] (protected)",
                "logs": "/api/logs[/:id] (protected)",
                "settings": "/api/settings[/:id] (protected)",
                "email": "/api/email/send (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match StoreManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
