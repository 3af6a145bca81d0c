use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// Returns 200 OK with status information
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "kapa-server"
    }))
}
