use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and loaded data size.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cv-dashboard",
        "jobs": state.catalog.store.len(),
        "sessions": state.sessions.len().await,
        "now_policy": state.config.now_policy,
    }))
}
