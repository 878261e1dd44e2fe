//! Test utilities for handler testing.
//!
//! Fixtures describe a Windows/Chrome visitor in Shanghai reaching the
//! service through Cloudflare.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use geoprobe_lib::{HeaderProfile, ProbeConfig, TargetLocation};

use crate::state::AppState;

/// Desktop Chrome on Windows.
pub const CHROME_WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Safari on macOS.
pub const SAFARI_MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15";

/// Visitor headers as Cloudflare would forward them.
pub const CLOUDFLARE_SHANGHAI: &[(&str, &str)] = &[
    ("cf-connecting-ip", "203.0.113.7"),
    ("cf-ipcity", "Shanghai"),
    ("cf-ipcountry", "CN"),
    ("cf-ipcontinent", "AS"),
    ("cf-region", "Shanghai"),
    ("cf-timezone", "Asia/Shanghai"),
    ("x-asn-organization", "China Telecom"),
    ("cf-iplatitude", "31.2304"),
    ("cf-iplongitude", "121.4737"),
    ("user-agent", CHROME_WINDOWS_UA),
];

/// Build a `HeaderMap` from name/value pairs.
///
/// # Panics
///
/// Panics on invalid header names or values, which indicates a broken fixture.
pub fn header_map(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers.insert(
            HeaderName::from_bytes(name.as_bytes()).expect("valid header name"),
            HeaderValue::from_str(value).expect("valid header value"),
        );
    }
    headers
}

/// Default state: Beijing target, Cloudflare headers.
pub fn test_state() -> AppState {
    AppState::default()
}

/// State with a custom target and header profile.
pub fn test_state_with(name: &str, latitude: f64, longitude: f64, profile: HeaderProfile) -> AppState {
    let target = TargetLocation::new(name, latitude, longitude).expect("valid test target");
    AppState::new(ProbeConfig {
        target,
        header_profile: profile,
    })
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_headers_are_valid() {
        let headers = header_map(CLOUDFLARE_SHANGHAI);
        assert_eq!(headers.len(), CLOUDFLARE_SHANGHAI.len());
        assert_eq!(headers.get("cf-ipcity").unwrap(), "Shanghai");
    }

    #[test]
    fn test_state_with_custom_target() {
        let state = test_state_with("Shanghai", 31.2304, 121.4737, HeaderProfile::CloudFront);
        assert_eq!(state.target().name, "Shanghai");
        assert_eq!(state.header_profile(), HeaderProfile::CloudFront);
    }

    #[test]
    fn test_request_id_format() {
        let id = test_request_id();
        assert!(id.starts_with("test-"));
        assert_ne!(id, test_request_id());
    }
}
