//! Platform-injected request metadata.
//!
//! [`EdgeContext`] mirrors the optional geolocation fields an edge network
//! attaches to a request. [`ClientMetadata`] is the same data with every
//! absent field replaced by the [`UNKNOWN`] placeholder.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::GeoPoint;

/// Placeholder reported for any field the platform did not supply.
pub const UNKNOWN: &str = "unknown";

/// Geolocation and network fields supplied by the hosting edge.
///
/// Every field is optional. Coordinates are kept as the raw strings the
/// platform sends; [`EdgeContext::coordinates`] parses them.
///
/// Deserialization never fails on a field's value: strings are kept, numbers
/// are kept as their text, and any other JSON type reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeContext {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Name of the autonomous system's organisation (the visitor's ISP).
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub as_organization: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => Some(text),
        Some(Raw::Number(number)) => Some(number.to_string()),
        Some(Raw::Other(_)) | None => None,
    })
}

impl EdgeContext {
    /// Visitor coordinates, if both halves are present and parse as finite numbers.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        let latitude = parse_coordinate(self.latitude.as_deref()?)?;
        let longitude = parse_coordinate(self.longitude.as_deref()?)?;
        Some(GeoPoint::new(latitude, longitude))
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

/// Visitor network and location metadata with placeholders filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub ip: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub continent: String,
    pub timezone: String,
    pub isp: String,
}

impl ClientMetadata {
    /// Build metadata from the edge context and the connecting IP.
    pub fn from_context(context: &EdgeContext, ip: Option<&str>) -> Self {
        Self {
            ip: or_unknown(ip),
            country: or_unknown(context.country.as_deref()),
            region: or_unknown(context.region.as_deref()),
            city: or_unknown(context.city.as_deref()),
            continent: or_unknown(context.continent.as_deref()),
            timezone: or_unknown(context.timezone.as_deref()),
            isp: or_unknown(context.as_organization.as_deref()),
        }
    }

    /// Human-readable `"{country}, {region}, {city}"` line.
    pub fn address(&self) -> String {
        format!("{}, {}, {}", self.country, self.region, self.city)
    }
}
