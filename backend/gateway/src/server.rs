//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use aura_core::VisionModel;
use aura_understanding::GeminiVision;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::analyze::{self, AnalyzeConfig};
use crate::cors;
use crate::health_api;

/// Application state shared across routes. Read-only after start-up.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<AnalyzeConfig>,
    pub model: Arc<dyn VisionModel>,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(config: AnalyzeConfig, model: Arc<dyn VisionModel>) -> Self {
        Self {
            config: Arc::new(config),
            model,
            started_at: Instant::now(),
        }
    }

    /// State backed by the Gemini API.
    ///
    /// Without an API key the client is still built; requests are rejected
    /// before it is ever called.
    pub fn gemini(config: AnalyzeConfig, api_base_url: &str) -> Self {
        if !config.has_api_key() {
            warn!("No API key configured; analysis requests will return 500");
        }
        let model = GeminiVision::new(config.api_key.clone().unwrap_or_default(), config.model.clone())
            .with_base_url(api_base_url);
        Self::new(config, Arc::new(model))
    }
}

/// Build the router with all routes and layers.
pub fn build_router(state: GatewayState, body_limit: usize) -> Router {
    Router::new()
        .route(
            "/api/analyze",
            post(analyze::analyze).options(cors::preflight),
        )
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the Axum HTTP server.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState, body_limit: usize) -> Result<()> {
    let app = build_router(state, body_limit);

    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "Gateway HTTP server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
