use axum::response::{IntoResponse, Json};

/// GET /health: liveness probe (public, no auth).
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Unity AI Backend is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
