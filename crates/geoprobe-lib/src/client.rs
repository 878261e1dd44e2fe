//! Coarse User-Agent classification.
//!
//! Both detectors walk an ordered marker table and stop at the first entry
//! whose marker occurs in the input. Matching is case-sensitive substring
//! search. The order is significant: Android user agents also contain
//! `Linux`, iOS user agents contain `like Mac OS X`, and Chrome user agents
//! carry a `Safari` token, so earlier entries shadow later ones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating system family reported for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperatingSystem {
    Windows,
    #[serde(rename = "macOS")]
    MacOs,
    Linux,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl OperatingSystem {
    /// Label used in responses and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            OperatingSystem::Windows => "Windows",
            OperatingSystem::MacOs => "macOS",
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Android => "Android",
            OperatingSystem::Ios => "iOS",
            OperatingSystem::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser family reported for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Browser {
    Edge,
    Chrome,
    Firefox,
    Safari,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Browser {
    /// Label used in responses and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Edge => "Edge",
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Safari => "Safari",
            Browser::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a User-Agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientClassification {
    pub os: OperatingSystem,
    pub browser: Browser,
}

/// OS markers in priority order. Any marker in a row selects that row.
const OS_MARKERS: &[(&[&str], OperatingSystem)] = &[
    (&["Windows"], OperatingSystem::Windows),
    (&["Mac OS"], OperatingSystem::MacOs),
    (&["Linux"], OperatingSystem::Linux),
    (&["Android"], OperatingSystem::Android),
    (&["iPhone", "iPad"], OperatingSystem::Ios),
];

/// Detect the operating system family from a User-Agent string.
pub fn detect_os(user_agent: &str) -> OperatingSystem {
    OS_MARKERS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| user_agent.contains(m)))
        .map(|&(_, os)| os)
        .unwrap_or_default()
}

/// Detect the browser family from a User-Agent string.
///
/// `Edg` is checked first because Edge also advertises `Chrome` and
/// `Safari`. Safari only wins when no `Chrome` token is present.
pub fn detect_browser(user_agent: &str) -> Browser {
    let has_chrome = user_agent.contains("Chrome");

    if user_agent.contains("Edg") {
        Browser::Edge
    } else if has_chrome {
        Browser::Chrome
    } else if user_agent.contains("Firefox") {
        Browser::Firefox
    } else if user_agent.contains("Safari") {
        Browser::Safari
    } else {
        Browser::Unknown
    }
}

/// Classify a User-Agent string into OS and browser families.
///
/// ```
/// use geoprobe_lib::{classify_client, Browser, OperatingSystem};
///
/// let ua = "Mozilla/5.0 (Windows NT 10.0) Chrome/100.0 Safari/537.36";
/// let result = classify_client(ua);
/// assert_eq!(result.os, OperatingSystem::Windows);
/// assert_eq!(result.browser, Browser::Chrome);
/// ```
pub fn classify_client(user_agent: &str) -> ClientClassification {
    ClientClassification {
        os: detect_os(user_agent),
        browser: detect_browser(user_agent),
    }
}
