use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Full health check: reports the global content state without fetching.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let global = state.store().global_state().await;

    Json(json!({
        "status": "ok",
        "content": global.label(),
        "strict": state.config().hide_fallbacks,
        "subscribers": state.event_bus().subscriber_count(),
    }))
}

/// Lightweight ping.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
