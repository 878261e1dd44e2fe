use thiserror::Error;

/// Convenient result alias for the geoprobe library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only configuration can fail. Request handling degrades missing or
/// malformed inputs to placeholders and never produces one of these.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A configured coordinate could not be parsed as a number.
    #[error("invalid {field}: '{value}' is not a number")]
    InvalidCoordinate { field: &'static str, value: String },

    /// A configured coordinate parsed but lies outside its valid range.
    #[error("{field} {value} is out of range [{min}, {max}]")]
    CoordinateOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Only one half of a latitude/longitude pair was configured.
    #[error("target location requires both latitude and longitude, missing {missing}")]
    IncompleteTarget { missing: &'static str },

    /// Raised when the configured header profile name is not recognised.
    #[error("unknown header profile '{value}'; expected one of: cloudflare, cloudfront")]
    UnknownHeaderProfile { value: String },
}
