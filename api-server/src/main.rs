//! Phish Guard API Server
//!
//! HTTP front end for the URL phishing classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   PHISH GUARD API                    │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌───────────┐      ┌────────────────────────────┐  │
//! │  │  Router   │ ───► │  PredictionService (Arc)   │  │
//! │  │  (Axum)   │      │  extractor → classifier    │  │
//! │  └───────────┘      └─────────────┬──────────────┘  │
//! │                                   ▼                 │
//! │                    phishing_model.json (read-only)  │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{header, HeaderValue, Method},
    routing::{get, post},
};
use phishguard_core::PredictionService;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::AppResult;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (also captures `log` records from the core)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "phishguard_api=debug,phishguard_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Phish Guard API starting...");

    // Load the classifier once; a failure leaves the service in degraded mode
    let service = PredictionService::load(&config.artifact).with_threshold(config.threshold);
    if service.is_model_loaded() {
        tracing::info!("Decision threshold: {}", config.threshold.threshold);
    } else {
        tracing::warn!("No model loaded - /predict will answer 500 until an operator fixes the artifact");
    }

    let state = AppState {
        service: Arc::new(service),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors_config = state.config.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| cors_config.is_origin_allowed(o))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/test", get(handlers::info::info))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
