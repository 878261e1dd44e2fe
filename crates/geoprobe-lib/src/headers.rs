//! Extraction of visitor data from request headers.
//!
//! Edge networks expose their geolocation data under different header names.
//! A [`HeaderProfile`] selects the naming scheme and
//! [`VisitorRequest::from_headers`] reads everything the report needs through
//! the [`HeaderSource`] abstraction, so `http::HeaderMap` (axum) and plain
//! string maps (Lambda events) share one code path.

use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::context::EdgeContext;
use crate::error::Error;

/// Standard header carrying the client-software identifier.
pub const USER_AGENT: &str = "user-agent";

/// Read-only, case-insensitive header lookup.
pub trait HeaderSource {
    /// Value of the named header, if present and valid text.
    fn header(&self, name: &str) -> Option<&str>;

    /// Like [`HeaderSource::header`] but blank values count as absent.
    fn non_empty_header(&self, name: &str) -> Option<&str> {
        self.header(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

impl HeaderSource for HeaderMap {
    /// Any UTF-8 value is accepted, not only the visible-ASCII subset
    /// `HeaderValue::to_str` allows.
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
    }
}

impl HeaderSource for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }
}

/// Header names used by one edge network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderNames {
    pub client_ip: &'static str,
    /// Whether the client IP header carries a trailing `:port`.
    pub client_ip_has_port: bool,
    pub city: &'static str,
    pub country: &'static str,
    pub continent: Option<&'static str>,
    pub region: &'static str,
    pub timezone: &'static str,
    pub as_organization: Option<&'static str>,
    pub latitude: &'static str,
    pub longitude: &'static str,
}

const CLOUDFLARE: HeaderNames = HeaderNames {
    client_ip: "cf-connecting-ip",
    client_ip_has_port: false,
    city: "cf-ipcity",
    country: "cf-ipcountry",
    continent: Some("cf-ipcontinent"),
    region: "cf-region",
    timezone: "cf-timezone",
    as_organization: Some("x-asn-organization"),
    latitude: "cf-iplatitude",
    longitude: "cf-iplongitude",
};

const CLOUDFRONT: HeaderNames = HeaderNames {
    client_ip: "cloudfront-viewer-address",
    client_ip_has_port: true,
    city: "cloudfront-viewer-city",
    country: "cloudfront-viewer-country",
    continent: None,
    region: "cloudfront-viewer-country-region",
    timezone: "cloudfront-viewer-time-zone",
    as_organization: None,
    latitude: "cloudfront-viewer-latitude",
    longitude: "cloudfront-viewer-longitude",
};

/// Edge network whose header naming scheme is used for extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderProfile {
    /// Cloudflare visitor location headers (default).
    #[default]
    Cloudflare,
    /// Amazon CloudFront viewer headers.
    CloudFront,
}

impl HeaderProfile {
    pub fn names(self) -> &'static HeaderNames {
        match self {
            HeaderProfile::Cloudflare => &CLOUDFLARE,
            HeaderProfile::CloudFront => &CLOUDFRONT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeaderProfile::Cloudflare => "cloudflare",
            HeaderProfile::CloudFront => "cloudfront",
        }
    }
}

impl fmt::Display for HeaderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cloudflare" => Ok(HeaderProfile::Cloudflare),
            "cloudfront" => Ok(HeaderProfile::CloudFront),
            _ => Err(Error::UnknownHeaderProfile {
                value: s.to_string(),
            }),
        }
    }
}

/// Everything the report needs from one incoming request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitorRequest {
    pub context: EdgeContext,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl VisitorRequest {
    /// Read the edge context, client IP and User-Agent from headers.
    pub fn from_headers<H>(headers: &H, profile: HeaderProfile) -> Self
    where
        H: HeaderSource + ?Sized,
    {
        let names = profile.names();
        Self {
            context: context_from_headers(headers, names),
            client_ip: client_ip(headers, names),
            user_agent: headers.header(USER_AGENT).map(str::to_string),
        }
    }

    /// Replace the header-derived context with one supplied by the platform.
    pub fn with_context(mut self, context: EdgeContext) -> Self {
        self.context = context;
        self
    }
}

fn context_from_headers<H>(headers: &H, names: &HeaderNames) -> EdgeContext
where
    H: HeaderSource + ?Sized,
{
    let read = |name: &str| headers.non_empty_header(name).map(str::to_string);
    let read_opt = |name: Option<&str>| name.and_then(read);

    EdgeContext {
        city: read(names.city),
        country: read(names.country),
        continent: read_opt(names.continent),
        region: read(names.region),
        timezone: read(names.timezone),
        as_organization: read_opt(names.as_organization),
        latitude: read(names.latitude),
        longitude: read(names.longitude),
    }
}

fn client_ip<H>(headers: &H, names: &HeaderNames) -> Option<String>
where
    H: HeaderSource + ?Sized,
{
    let raw = headers.non_empty_header(names.client_ip)?;
    if names.client_ip_has_port {
        Some(strip_port(raw).to_string())
    } else {
        Some(raw.to_string())
    }
}

/// Drop a trailing `:port` from an `ip:port` pair, IPv4 or IPv6.
fn strip_port(raw: &str) -> &str {
    if raw.parse::<IpAddr>().is_ok() {
        return raw;
    }
    match raw.rsplit_once(':') {
        Some((ip, port)) if port.parse::<u16>().is_ok() => {
            let ip = ip.trim_start_matches('[').trim_end_matches(']');
            if ip.parse::<IpAddr>().is_ok() {
                ip
            } else {
                raw
            }
        }
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn cloudflare_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            ("cf-connecting-ip", "203.0.113.7"),
            ("cf-ipcity", "Shanghai"),
            ("cf-ipcountry", "CN"),
            ("cf-ipcontinent", "AS"),
            ("cf-region", "Shanghai"),
            ("cf-timezone", "Asia/Shanghai"),
            ("x-asn-organization", "China Telecom"),
            ("cf-iplatitude", "31.2304"),
            ("cf-iplongitude", "121.4737"),
            ("user-agent", "Mozilla/5.0 (Windows NT 10.0) Chrome/100.0"),
        ] {
            headers.insert(name, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_cloudflare_extraction() {
        let request = VisitorRequest::from_headers(&cloudflare_headers(), HeaderProfile::Cloudflare);
        assert_eq!(request.client_ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(request.context.city.as_deref(), Some("Shanghai"));
        assert_eq!(request.context.continent.as_deref(), Some("AS"));
        assert_eq!(
            request.context.as_organization.as_deref(),
            Some("China Telecom")
        );
        assert!(request.context.coordinates().is_some());
        assert!(request.user_agent.unwrap().contains("Chrome"));
    }

    #[test]
    fn test_missing_headers_are_none() {
        let request = VisitorRequest::from_headers(&HeaderMap::new(), HeaderProfile::Cloudflare);
        assert_eq!(request, VisitorRequest::default());
    }

    #[test]
    fn test_blank_headers_are_none() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-ipcity", HeaderValue::from_static("   "));
        headers.insert("cf-connecting-ip", HeaderValue::from_static(""));
        let request = VisitorRequest::from_headers(&headers, HeaderProfile::Cloudflare);
        assert!(request.context.city.is_none());
        assert!(request.client_ip.is_none());
    }

    #[test]
    fn test_cloudfront_profile_strips_port() {
        let mut headers: HashMap<String, String> = HashMap::new();
        headers.insert(
            "CloudFront-Viewer-Address".to_string(),
            "198.51.100.10:46532".to_string(),
        );
        headers.insert("CloudFront-Viewer-City".to_string(), "Seattle".to_string());
        headers.insert(
            "CloudFront-Viewer-Country-Region".to_string(),
            "WA".to_string(),
        );

        let request = VisitorRequest::from_headers(&headers, HeaderProfile::CloudFront);
        assert_eq!(request.client_ip.as_deref(), Some("198.51.100.10"));
        assert_eq!(request.context.city.as_deref(), Some("Seattle"));
        assert_eq!(request.context.region.as_deref(), Some("WA"));
        assert!(request.context.continent.is_none());
        assert!(request.context.as_organization.is_none());
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("198.51.100.10:46532"), "198.51.100.10");
        assert_eq!(strip_port("198.51.100.10"), "198.51.100.10");
        assert_eq!(strip_port("2001:db8::1"), "2001:db8::1");
        assert_eq!(strip_port("[2001:db8::1]:443"), "2001:db8::1");
        assert_eq!(strip_port("2001:db8:0:0:0:0:0:1:443"), "2001:db8:0:0:0:0:0:1");
        assert_eq!(strip_port("not-an-ip:80"), "not-an-ip:80");
    }

    #[test]
    fn test_utf8_header_values_are_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "user-agent",
            HeaderValue::from_bytes("Mozilla/5.0 (Windows NT 10.0) Chrome/100.0 MyApp/Café".as_bytes())
                .unwrap(),
        );
        headers.insert("cf-ipcity", HeaderValue::from_bytes("Zürich".as_bytes()).unwrap());

        let request = VisitorRequest::from_headers(&headers, HeaderProfile::Cloudflare);
        assert_eq!(request.context.city.as_deref(), Some("Zürich"));
        assert!(request.user_agent.as_deref().unwrap().ends_with("Café"));
    }

    #[test]
    fn test_invalid_utf8_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-ipcity", HeaderValue::from_bytes(&[0x5a, 0xfc, 0x72]).unwrap());
        assert_eq!(headers.header("cf-ipcity"), None);
    }

    #[test]
    fn test_string_map_lookup_is_case_insensitive() {
        let mut headers: HashMap<String, String> = HashMap::new();
        headers.insert("User-Agent".to_string(), "curl/8.5.0".to_string());
        assert_eq!(headers.header("user-agent"), Some("curl/8.5.0"));
        assert_eq!(headers.header("USER-AGENT"), Some("curl/8.5.0"));
        assert_eq!(headers.header("accept"), None);
    }

    #[test]
    fn test_header_profile_parse_and_display() {
        assert_eq!(
            "cloudflare".parse::<HeaderProfile>().unwrap(),
            HeaderProfile::Cloudflare
        );
        assert_eq!(
            " CLOUDFRONT ".parse::<HeaderProfile>().unwrap(),
            HeaderProfile::CloudFront
        );
        assert!("fastly".parse::<HeaderProfile>().is_err());
        assert_eq!(HeaderProfile::CloudFront.to_string(), "cloudfront");
    }

    #[test]
    fn test_with_context_overrides_headers() {
        let request = VisitorRequest::from_headers(&cloudflare_headers(), HeaderProfile::Cloudflare)
            .with_context(EdgeContext::default());
        assert!(request.context.city.is_none());
        assert_eq!(request.client_ip.as_deref(), Some("203.0.113.7"));
    }
}
