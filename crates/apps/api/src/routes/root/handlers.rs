use axum::Json;
use serde_json::{Value, json};

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Root",
    responses(
        (status = 200, description = "The server is up."),
    )
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
