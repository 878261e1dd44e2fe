//! Pretty-printed JSON responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Content type sent with every visitor report.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Wrapper that renders its payload as indented JSON with status 200.
///
/// Unlike `axum::Json` the body is pretty-printed and the content type
/// carries an explicit charset.
///
/// # Example
///
/// ```
/// use geoprobe_service_shared::PrettyJson;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Greeting {
///     hello: &'static str,
/// }
///
/// let response = PrettyJson(Greeting { hello: "world" });
/// ```
#[derive(Debug, Clone)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response body");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
