//! geoprobe library entry points.
//!
//! This crate holds the pure logic behind the visitor metadata endpoint:
//! great-circle distance, User-Agent classification, the platform-injected
//! edge context, header extraction, and assembly of the flat visitor report.
//! Higher-level consumers (HTTP service, Lambda) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod geo;
pub mod headers;
pub mod report;

pub use client::{classify_client, Browser, ClientClassification, OperatingSystem};
pub use config::{ProbeConfig, TargetLocation};
pub use context::{ClientMetadata, EdgeContext, UNKNOWN};
pub use error::{Error, Result};
pub use geo::{distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use headers::{HeaderProfile, HeaderSource, VisitorRequest};
pub use report::{build_report, VisitorReport};
