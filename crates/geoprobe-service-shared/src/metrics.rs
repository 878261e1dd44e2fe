//! Prometheus metrics for geoprobe services.
//!
//! This module provides:
//! - [`MetricsConfig`]: whether metrics are on and where they are served
//! - [`init_metrics`]: install the Prometheus recorder
//! - [`metrics_handler`]: axum handler rendering the exposition text
//! - Visitor metric helpers recorded by the endpoint handler
//!
//! # Example
//!
//! ```no_run
//! use geoprobe_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//! use axum::{routing::get, Router};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new().route(&config.path, get(metrics_handler));
//! ```

use geoprobe_lib::{Browser, OperatingSystem};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the exposition text, e.g. `/metrics`.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: anything but `false` enables metrics (default: enabled)
    /// - `METRICS_PATH`: route for the exposition endpoint (default: `/metrics`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let path = lookup("METRICS_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the Prometheus recorder.
///
/// Must run once at startup before anything is recorded; later calls fail
/// with [`MetricsError::AlreadyInitialized`].
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for the metrics endpoint.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Count one classified visitor.
///
/// Increments `geoprobe_visitors_classified_total{os,browser}`. Label values
/// come from closed enums so cardinality stays bounded.
pub fn record_visitor_classified(os: OperatingSystem, browser: Browser) {
    metrics::counter!(
        "geoprobe_visitors_classified_total",
        "os" => os.as_str(),
        "browser" => browser.as_str()
    )
    .increment(1);
}

/// Record the visitor's distance to the target in `geoprobe_distance_km`.
pub fn record_distance(km: f64) {
    metrics::histogram!("geoprobe_distance_km").record(km);
}

/// Count a visitor whose location could not be used for a distance.
///
/// Increments `geoprobe_location_unknown_total`.
pub fn record_location_unknown() {
    metrics::counter!("geoprobe_location_unknown_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        let config = MetricsConfig::from_lookup(|key| match key {
            "METRICS_ENABLED" => Some("FALSE".to_string()),
            "METRICS_PATH" => Some("/internal/metrics".to_string()),
            _ => None,
        });
        assert!(!config.enabled);
        assert_eq!(config.path, "/internal/metrics");
    }

    #[test]
    fn test_metrics_path_must_be_absolute() {
        let config = MetricsConfig::from_lookup(|key| {
            (key == "METRICS_PATH").then(|| "metrics".to_string())
        });
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_disabled_config_is_rejected() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert_eq!(init_metrics(&config), Err(MetricsError::Disabled));
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_format() {
        // The recorder is global, so this only checks the output is exposition text.
        let output = metrics_handler().await;
        assert!(output.is_empty() || output.contains('#') || output.contains("geoprobe_"));
    }

    #[test]
    fn test_visitor_helpers_do_not_panic_without_recorder() {
        record_visitor_classified(OperatingSystem::Windows, Browser::Chrome);
        record_visitor_classified(OperatingSystem::Unknown, Browser::Unknown);
        record_distance(1068.0);
        record_location_unknown();
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
