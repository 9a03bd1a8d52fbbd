//! Health check and smoke-test endpoints.

use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, "Hello from devconnector")
}

pub async fn health_handler() -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, axum::Json(body))
}

pub(crate) fn works(area: &str) -> impl IntoResponse {
    let body = serde_json::json!({ "msg": format!("{area} Works!") });
    (StatusCode::OK, axum::Json(body))
}
