//! Startup configuration shared by the HTTP service and the Lambda.
//!
//! # Environment Variables
//!
//! - `GEOPROBE_TARGET_NAME`: display name of the target location (default `Beijing`)
//! - `GEOPROBE_TARGET_LATITUDE` / `GEOPROBE_TARGET_LONGITUDE`: target coordinates,
//!   both or neither (default 39.9042, 116.4074)
//! - `GEOPROBE_HEADER_PROFILE`: `cloudflare` (default) or `cloudfront`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::headers::HeaderProfile;

pub const ENV_TARGET_NAME: &str = "GEOPROBE_TARGET_NAME";
pub const ENV_TARGET_LATITUDE: &str = "GEOPROBE_TARGET_LATITUDE";
pub const ENV_TARGET_LONGITUDE: &str = "GEOPROBE_TARGET_LONGITUDE";
pub const ENV_HEADER_PROFILE: &str = "GEOPROBE_HEADER_PROFILE";

/// Fixed reference point that visitor distances are measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetLocation {
    pub name: String,
    pub point: GeoPoint,
}

impl Default for TargetLocation {
    /// Tiananmen Square, Beijing.
    fn default() -> Self {
        Self {
            name: "Beijing".to_string(),
            point: GeoPoint::new(39.9042, 116.4074),
        }
    }
}

impl TargetLocation {
    /// Create a target, rejecting coordinates outside the valid ranges.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        check_range("latitude", latitude, 90.0)?;
        check_range("longitude", longitude, 180.0)?;
        Ok(Self {
            name: name.into(),
            point: GeoPoint::new(latitude, longitude),
        })
    }

    /// Parse a target from raw configuration strings.
    pub fn parse(name: impl Into<String>, latitude: &str, longitude: &str) -> Result<Self> {
        let latitude = parse_number("latitude", latitude)?;
        let longitude = parse_number("longitude", longitude)?;
        Self::new(name, latitude, longitude)
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidCoordinate {
            field,
            value: raw.to_string(),
        })
}

fn check_range(field: &'static str, value: f64, bound: f64) -> Result<()> {
    if (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(Error::CoordinateOutOfRange {
            field,
            value,
            min: -bound,
            max: bound,
        })
    }
}

/// Immutable configuration built once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeConfig {
    pub target: TargetLocation,
    pub header_profile: HeaderProfile,
}

impl ProbeConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_target = TargetLocation::default();
        let name = get(ENV_TARGET_NAME).unwrap_or_else(|| default_target.name.clone());

        let target = match (get(ENV_TARGET_LATITUDE), get(ENV_TARGET_LONGITUDE)) {
            (Some(lat), Some(lon)) => TargetLocation::parse(name, &lat, &lon)?,
            (None, None) => TargetLocation {
                name,
                point: default_target.point,
            },
            (Some(_), None) => return Err(Error::IncompleteTarget { missing: "longitude" }),
            (None, Some(_)) => return Err(Error::IncompleteTarget { missing: "latitude" }),
        };

        let header_profile = match get(ENV_HEADER_PROFILE) {
            Some(raw) => raw.parse()?,
            None => HeaderProfile::default(),
        };

        debug!(
            target = %target.name,
            latitude = target.point.latitude,
            longitude = target.point.longitude,
            header_profile = %header_profile,
            "configuration resolved"
        );

        Ok(Self {
            target,
            header_profile,
        })
    }
}
