//! Liveness HTTP routes.
//!
//! Served on `PORT` next to the bot: in polling mode on their own listener, in
//! webhook mode merged with the Telegram webhook router.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Instant;

use crate::core::metrics::Metrics;

/// Body returned by `GET /`
pub const LIVENESS_BODY: &str = "Bot is running!";

/// Shared state for the web server.
#[derive(Clone)]
struct WebState {
    start_time: Instant,
    metrics: Arc<Metrics>,
}

/// Builds the liveness router.
///
/// - `/`        - static liveness acknowledgment
/// - `/health`  - JSON health check with uptime
/// - `/metrics` - Prometheus metrics
pub fn router(metrics: Arc<Metrics>) -> Router {
    let state = WebState {
        start_time: Instant::now(),
        metrics,
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Serve `app` on an already bound listener.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET /
async fn root_handler() -> &'static str {
    LIVENESS_BODY
}

/// GET /health
async fn health_handler(State(state): State<WebState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed();

    let health_status = json!({
        "status": "healthy",
        "uptime_seconds": uptime.as_secs(),
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, Json(health_status))
}

/// GET /metrics
async fn metrics_handler(State(state): State<WebState>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, state.metrics.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode metrics: {}", e)).into_response()
        }
    }
}
