use crate::infra::{handle_panic, log_request, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{middleware, Extension, Json, Router};
use receipt_points::receipts::{receipt_router, ReceiptRepository, ReceiptService};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

pub(crate) fn with_receipt_routes<R>(service: ReceiptService<R>) -> Router
where
    R: ReceiptRepository + 'static,
{
    receipt_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// Full application router minus the metrics layer, which can only be installed once.
pub(crate) fn build_app<R>(service: ReceiptService<R>, state: AppState) -> Router
where
    R: ReceiptRepository + 'static,
{
    with_receipt_routes(service)
        .layer(Extension(state))
        .layer(middleware::from_fn(log_request))
        .layer(CatchPanicLayer::custom(handle_panic))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
