//! Health check handlers for Kubernetes probes.
//!
//! `/health/live` answers as long as the process runs. `/health/ready`
//! additionally reports the configuration the visitor endpoint will use.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" when healthy.
    pub status: String,
    pub service: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_profile: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            target_location: None,
            header_profile: None,
        }
    }

    pub fn ready(state: &AppState) -> Self {
        Self {
            target_location: Some(state.target().name.clone()),
            header_profile: Some(state.header_profile().to_string()),
            ..Self::alive(state.service(), state.version())
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"geoprobe-service","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service(), state.version());
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The visitor endpoint has no external dependencies, so readiness only
/// confirms that configuration was resolved.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"geoprobe-service","version":"0.1.0","target_location":"Beijing","header_profile":"cloudflare"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::ready(&state);
    (StatusCode::OK, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("geoprobe", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "geoprobe");
        assert!(status.target_location.is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let state = AppState::default().with_service("geoprobe-service", "1.0.0");
        let status = HealthStatus::ready(&state);
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "geoprobe-service");
        assert_eq!(status.version, "1.0.0");
        assert_eq!(status.target_location.as_deref(), Some("Beijing"));
        assert_eq!(status.header_profile.as_deref(), Some("cloudflare"));
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::alive("geoprobe", "0.1.0")).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("target_location"));
    }
}
