//! geoprobe visitor metadata HTTP microservice.
//!
//! Every request that is not a health or metrics probe is answered with a
//! pretty-printed JSON report describing the caller: IP, location, operating
//! system, browser, ISP and the distance to the configured target location.
//!
//! # Endpoints
//!
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//! - `GET /metrics` - Prometheus metrics endpoint (path configurable)
//! - any other method and path - visitor report

#![deny(warnings)]

use axum::{
    extract::State,
    http::HeaderMap,
    routing::get,
    Extension, Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use geoprobe_lib::{build_report, VisitorReport, VisitorRequest};
use geoprobe_service_shared::{
    health_live, health_ready, metrics_handler, record_distance, record_location_unknown,
    record_visitor_classified, AppState, PrettyJson, RequestId, RequestTrackingLayer,
};

/// Default route for the Prometheus exposition text.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Build the service router with the default metrics path.
pub fn app(state: AppState) -> Router {
    app_with_metrics_path(state, DEFAULT_METRICS_PATH)
}

/// Build the service router serving metrics at `metrics_path`.
pub fn app_with_metrics_path(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .route(metrics_path, get(metrics_handler))
        .fallback(visitor_handler)
        .layer(CorsLayer::permissive())
        .layer(RequestTrackingLayer)
        .with_state(state)
}

/// Answer any request with the caller's visitor report.
async fn visitor_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
) -> PrettyJson<VisitorReport> {
    let request = VisitorRequest::from_headers(&headers, state.header_profile());
    let report = build_report(&request, state.target());

    record_visitor_classified(report.os, report.browser);
    match report.distance_km {
        Some(km) if km.is_finite() => record_distance(km),
        _ => record_location_unknown(),
    }

    info!(
        request_id = %request_id,
        os = %report.os,
        browser = %report.browser,
        country = %report.country,
        distance = %report.distance,
        "visitor report served"
    );

    PrettyJson(report)
}
