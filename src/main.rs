//! Premium Estimator Service
//!
//! Prices health-insurance premium quotes through an external ONNX model
//! and appends every submission to a spreadsheet-style CSV log.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PREMIUM ESTIMATOR                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌─────────────┐  ┌───────────────────────┐ │
//! │  │  API      │  │  Feature    │  │  Premium Model        │ │
//! │  │  Gateway  │─▶│  Schema /   │─▶│  (ONNX Runtime)       │ │
//! │  │  (Axum)   │  │  Layout     │  │                       │ │
//! │  └───────────┘  └─────────────┘  └──────────┬────────────┘ │
//! │                                             ▼              │
//! │                                   ┌─────────────────┐      │
//! │                                   │ Submission Log  │      │
//! │                                   │ (CSV, append)   │      │
//! │                                   └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::model::{OnnxPremiumModel, PremiumModel};
use logic::submissions::SubmissionLog;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "premium_estimator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Premium Estimator starting...");
    if !config.is_production() {
        tracing::debug!("development mode: permissive CORS enabled");
    }

    // Submission store
    let log = Arc::new(SubmissionLog::new(config.submissions_path.clone()));
    tracing::info!("Submission store: {}", log.path().display());

    // Premium model; the service starts without one, quotes fail until it loads
    let engine = OnnxPremiumModel::new();
    match engine.load(&config.model_path) {
        Ok(meta) => tracing::info!("Premium model ready (sha256 {})", meta.checksum_sha256),
        Err(e) => tracing::warn!(
            "Premium model unavailable: {} - quotes will fail until an artefact is provided at {}",
            e,
            config.model_path
        ),
    }
    let model: Arc<dyn PremiumModel> = Arc::new(engine);

    // Build application state
    let state = AppState { config: config.clone(), model, log };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub model: Arc<dyn PremiumModel>,
    pub log: Arc<SubmissionLog>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/schema", get(handlers::schema::get))
        .route("/api/v1/quote", post(handlers::quote::create))
        .route("/api/v1/submissions", get(handlers::submissions::list))
        .route("/api/v1/submissions/stats", get(handlers::submissions::stats))
        .route("/api/v1/engine", get(handlers::engine::status))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
