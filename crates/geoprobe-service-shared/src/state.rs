//! Application state for the HTTP service.
//!
//! Holds the immutable [`ProbeConfig`] resolved at startup so axum handlers
//! can read the target location and header profile, plus the identity of the
//! serving binary reported by the health probes.

use std::sync::Arc;

use geoprobe_lib::{HeaderProfile, ProbeConfig, TargetLocation};

/// Shared application state for axum handlers.
///
/// Cheap to clone (`Arc` inside); share it via axum's `State` extractor.
///
/// ```
/// use axum::{extract::State, routing::get, Router};
/// use geoprobe_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) -> String {
///     state.target().name.clone()
/// }
///
/// let app: Router = Router::new()
///     .route("/target", get(handler))
///     .with_state(AppState::default());
/// ```
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProbeConfig,
    service: String,
    version: String,
}

impl Default for AppStateInner {
    fn default() -> Self {
        Self {
            config: ProbeConfig::default(),
            service: "geoprobe".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AppState {
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                ..AppStateInner::default()
            }),
        }
    }

    /// Name and version reported by the health probes, normally the serving
    /// binary's `SERVICE_NAME` and `CARGO_PKG_VERSION`.
    pub fn with_service(self, service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: self.inner.config.clone(),
                service: service.into(),
                version: version.into(),
            }),
        }
    }

    /// Resolve state from the process environment.
    pub fn from_env() -> geoprobe_lib::Result<Self> {
        let config = ProbeConfig::from_env()?;
        tracing::info!(
            target_location = %config.target.name,
            header_profile = %config.header_profile,
            "application state resolved"
        );
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.inner.config
    }

    pub fn target(&self) -> &TargetLocation {
        &self.inner.config.target
    }

    pub fn header_profile(&self) -> HeaderProfile {
        self.inner.config.header_profile
    }

    pub fn service(&self) -> &str {
        &self.inner.service
    }

    pub fn version(&self) -> &str {
        &self.inner.version
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.inner.service)
            .field("target", &self.inner.config.target.name)
            .field("header_profile", &self.inner.config.header_profile)
            .finish()
    }
}
