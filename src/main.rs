use bolso_api::domain::Setting;
use bolso_api::store::{schema, PgCollection, StoreManager};
use bolso_api::{audit, config, server, services};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Bolso API in {:?} mode", config.environment);

    // Storage must be reachable before serving traffic
    let pool = StoreManager::pool()
        .await
        .unwrap_or_else(|e| panic!("storage unavailable: {}", e));
    schema::ensure_collections(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to prepare collections: {}", e));

    audit::init(pool.clone());
    services::email::init(&PgCollection::<Setting>::new(pool)).await;

    let app = server::app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("BOLSO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Bolso API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
