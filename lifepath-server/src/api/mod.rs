//! HTTP/JSON API Layer
//!
//! REST-like endpoints following gRPC path conventions; the web client
//! calls these via JSON-over-HTTP transport.
//!
//! ## Architecture
//! ```text
//! Web client (JSON mode)
//!       | HTTP POST, JSON body
//! Axum Router (port 8080)
//!       |
//! Service Handlers (market_data, canvas, gamification, profile)
//!       |
//! Repositories (LMDB documents + PostgreSQL profiles)
//! ```
//!
//! ## Endpoint Convention
//! All endpoints follow the path pattern `POST /lifepath.<Service>/<Method>`
//! Example: `POST /lifepath.MarketDataService/GetSalaryData`

pub mod canvas;
pub mod gamification;
pub mod market_data;
pub mod profile;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::market_client::MarketClient;
use crate::metrics::ServerMetrics;
use crate::storage::{CanvasRepo, GamificationRepo, ProfileRepo};

/// Shared state available to all API handlers; repositories are injected
/// as trait objects so tests and degraded mode can swap backends.
#[derive(Clone)]
pub struct ApiState {
    pub canvas: Arc<dyn CanvasRepo>,
    pub gamification: Arc<dyn GamificationRepo>,
    pub profiles: Arc<dyn ProfileRepo>,
    pub market: Arc<MarketClient>,
    /// Server-wide metrics (lock-free atomics)
    pub metrics: Arc<ServerMetrics>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full API router with all service endpoints
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(crate::metrics::prometheus_handler))
        .route("/metrics/json", get(crate::metrics::json_metrics_handler))
        .merge(market_data::routes())
        .merge(canvas::routes())
        .merge(gamification::routes())
        .merge(profile::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::metrics::metrics_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP API server on the given port
pub async fn start_api_server(state: ApiState, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
