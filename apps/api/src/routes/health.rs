use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// GET /health
/// Reports service version, whether a provider key is configured, and the share backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobalign-api",
        "providerConfigured": state.config.gemini_api_key.is_some(),
        "model": state.analyzer.model(),
        "shareStore": state.shares.backend(),
    }))
}
