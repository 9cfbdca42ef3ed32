//! HTTP API for the QuickBarcode webhook receiver.

use std::sync::Arc;
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use quickbarcode_sync::{EventAdapter, EventReport};
use quickbarcode_types::LifecycleEvent;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether registry credentials are present.
    pub configured: bool,
}

async fn event_handler(
    State(adapter): State<Arc<EventAdapter>>,
    Json(event): Json<LifecycleEvent>,
) -> Json<EventReport> {
    let report = adapter.handle(&event).await;
    if !matches!(report, EventReport::Ignored { .. }) {
        info!("Event '{}' (id {:?}): {:?}", event.event, event.id, report);
    }
    Json(report)
}

async fn health_handler(State(adapter): State<Arc<EventAdapter>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        configured: adapter.is_configured(),
    })
}

/// Build the HTTP API router around an event adapter.
pub fn build_router(adapter: Arc<EventAdapter>) -> Router {
    Router::new()
        .route("/api/v1/events", post(event_handler))
        .route("/api/v1/health", get(health_handler))
        .with_state(adapter)
}
