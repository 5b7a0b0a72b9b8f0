//! Floorboard server entry point: config from env, pool + migrations, then
//! the Axum router.

mod db;
mod routes;
mod services;
mod shape;
mod state;

use std::path::PathBuf;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let uploads_dir: PathBuf = std::env::var("UPLOADS_DIR")
        .unwrap_or_else(|_| "uploads".into())
        .into();
    let max_connections = std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(db::DEFAULT_MAX_CONNECTIONS);

    let pool = db::init_pool(&database_url, max_connections)
        .await
        .expect("database init failed");

    let state = state::AppState::new(pool, uploads_dir);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "floorboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
