use axum::Json;
use serde_json::{Value, json};

/// Liveness probe.
pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
