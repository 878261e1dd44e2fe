//! Invocation payload and proxy response shapes.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use geoprobe_lib::EdgeContext;

/// Content type of every response body.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Event delivered to the function.
///
/// ```json
/// {
///   "headers": { "user-agent": "Mozilla/5.0 ...", "cf-connecting-ip": "203.0.113.7" },
///   "cf": { "city": "Shanghai", "latitude": "31.2304", "longitude": "121.4737" }
/// }
/// ```
///
/// When `cf` is absent the edge context is read from the headers. Malformed
/// parts never reject the event: `headers` that are not an object read as
/// empty, non-string header values are dropped, and a `cf` that is not an
/// object reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationEvent {
    #[serde(default, deserialize_with = "lenient_headers")]
    pub headers: HashMap<String, String>,

    #[serde(
        default,
        deserialize_with = "lenient_context",
        skip_serializing_if = "Option::is_none"
    )]
    pub cf: Option<EdgeContext>,
}

fn lenient_headers<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(text) => Some((name, text)),
                _ => None,
            })
            .collect(),
        _ => HashMap::new(),
    })
}

fn lenient_context<'de, D>(deserializer: D) -> Result<Option<EdgeContext>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Lambda proxy integration response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    /// 200 response carrying a JSON body.
    pub fn json(body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), JSON_CONTENT_TYPE.to_string());
        Self {
            status_code: 200,
            headers,
            body,
        }
    }
}
