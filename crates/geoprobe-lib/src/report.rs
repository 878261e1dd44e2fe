//! Assembly of the flat visitor report returned by the endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{classify_client, Browser, OperatingSystem};
use crate::config::TargetLocation;
use crate::context::{ClientMetadata, UNKNOWN};
use crate::headers::VisitorRequest;

/// Response payload describing the visitor.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorReport {
    pub ip: String,
    pub address: String,
    pub country: String,
    pub city: String,
    pub continent: String,
    pub timezone: String,
    pub os: OperatingSystem,
    pub browser: Browser,
    pub isp: String,
    /// `"about N km"`, or the placeholder when coordinates were unusable.
    pub distance: String,
    pub target_location_name: String,

    /// Rounded distance in kilometres, kept for metrics and logging.
    #[serde(skip)]
    pub distance_km: Option<f64>,
}

impl VisitorReport {
    /// Pretty-printed JSON body.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn format_distance(km: f64) -> String {
    format!("about {km} km")
}

/// Derive the visitor report for a request.
///
/// Never fails: absent inputs become the `"unknown"` placeholder and an
/// absent User-Agent is classified as the empty string.
pub fn build_report(request: &VisitorRequest, target: &TargetLocation) -> VisitorReport {
    let metadata = ClientMetadata::from_context(&request.context, request.client_ip.as_deref());
    let classification = classify_client(request.user_agent.as_deref().unwrap_or(""));

    let distance_km = request
        .context
        .coordinates()
        .map(|visitor| visitor.distance_km_to(&target.point));

    debug!(
        os = %classification.os,
        browser = %classification.browser,
        distance_km = ?distance_km,
        "visitor classified"
    );

    VisitorReport {
        address: metadata.address(),
        ip: metadata.ip,
        country: metadata.country,
        city: metadata.city,
        continent: metadata.continent,
        timezone: metadata.timezone,
        os: classification.os,
        browser: classification.browser,
        isp: metadata.isp,
        distance: distance_km
            .map(format_distance)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        target_location_name: target.name.clone(),
        distance_km,
    }
}
