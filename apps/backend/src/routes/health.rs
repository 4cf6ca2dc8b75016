//! Health and status endpoints.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "eth-whatif-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api
pub async fn status() -> Json<Value> {
    Json(json!({
        "status": "API is running",
        "message": "Connect to /api/eth-price to see data",
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
