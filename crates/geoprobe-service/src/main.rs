//! geoprobe HTTP service binary.
//!
//! # Configuration
//!
//! - `GEOPROBE_TARGET_NAME`, `GEOPROBE_TARGET_LATITUDE`, `GEOPROBE_TARGET_LONGITUDE` -
//!   target location (default: Beijing)
//! - `GEOPROBE_HEADER_PROFILE` - `cloudflare` (default) or `cloudfront`
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus exposition

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info, warn};

use geoprobe_service::app_with_metrics_path;
use geoprobe_service_shared::{init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env().with_service("geoprobe-service");
    init_logging(&logging_config).context("failed to initialise logging")?;

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "metrics unavailable, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let service = logging_config
        .service
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let state = AppState::from_env()
        .map_err(|e| {
            error!(error = %e, "invalid geoprobe configuration");
            e
        })?
        .with_service(service, env!("CARGO_PKG_VERSION"));

    let app = app_with_metrics_path(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
