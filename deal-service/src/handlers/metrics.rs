use axum::response::IntoResponse;
use service_core::observability::metrics;

pub async fn metrics() -> impl IntoResponse {
    metrics::render()
}
