use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::interfaces::http::common::ApiError;
use crate::interfaces::http::ApiState;

/// `GET /metrics`: Prometheus text exposition (no auth)
pub async fn prometheus_metrics(State(state): State<ApiState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            handle.render(),
        )
            .into_response(),
        None => ApiError::new(StatusCode::NOT_FOUND, "Metrics are not enabled").into_response(),
    }
}
