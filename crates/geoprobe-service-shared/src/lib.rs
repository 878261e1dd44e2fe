//! Shared infrastructure for the geoprobe HTTP service.
//!
//! This crate provides the HTTP glue around `geoprobe-lib`:
//!
//! - [`AppState`]: Target location and header profile resolved at startup
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`PrettyJson`]: Indented JSON responses with an explicit charset
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//!
//! # Architecture
//!
//! Handlers stay thin. Header extraction, classification and distance
//! calculation all live in `geoprobe-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Read request headers                                     │
//! │  - Call geoprobe-lib build_report                           │
//! │  - Record metrics                                           │
//! │  - Render pretty JSON                                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides header fixtures and state helpers.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
pub use metrics::{
    init_metrics, metrics_handler, record_distance, record_location_unknown,
    record_visitor_classified, MetricsConfig, MetricsError,
};
pub use middleware::{
    extract_or_generate_request_id, route_label, RequestId, RequestTrackingLayer,
    FALLBACK_ROUTE_LABEL, REQUEST_ID_HEADER,
};
pub use response::{PrettyJson, JSON_CONTENT_TYPE};
pub use state::AppState;
