mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dataset = commander_deck_analyzer::config::dataset_path();
    tracing::info!(dataset = %dataset.display(), "initializing deck analyzer");
    let analyzer = commander_deck_analyzer::AsyncDeckAnalyzer::builder()
        .dataset_path(&dataset)
        .shared(true)
        .build()
        .await
        .expect("Failed to initialize deck analyzer");
    match analyzer.snapshot().await {
        Ok(current) => tracing::info!(analyzer = %current, "analyzer ready"),
        Err(e) => tracing::warn!(error = %e, "could not inspect analyzer"),
    }

    let state = Arc::new(AppState { analyzer });

    let app = Router::new()
        .route("/api/analyze", post(routes::analyze::analyze))
        .route("/api/meta", get(routes::meta::get_meta))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
