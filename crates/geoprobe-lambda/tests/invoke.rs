use std::collections::HashMap;

use geoprobe_lambda::{handler, respond, InvocationEvent, ProxyResponse, JSON_CONTENT_TYPE};
use geoprobe_lib::{EdgeContext, HeaderProfile, ProbeConfig, TargetLocation};
use lambda_runtime::{Context, LambdaEvent};
use serde_json::{json, Value};

const CHROME_WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

fn body(response: &ProxyResponse) -> Value {
    serde_json::from_str(&response.body).expect("body is JSON")
}

fn shanghai_cf() -> EdgeContext {
    EdgeContext {
        city: Some("Shanghai".to_string()),
        country: Some("CN".to_string()),
        continent: Some("AS".to_string()),
        region: Some("Shanghai".to_string()),
        timezone: Some("Asia/Shanghai".to_string()),
        as_organization: Some("China Telecom".to_string()),
        latitude: Some("31.2304".to_string()),
        longitude: Some("121.4737".to_string()),
    }
}

#[tokio::test]
async fn answers_raw_event_through_handler() {
    let payload = json!({
        "headers": {
            "User-Agent": CHROME_WINDOWS_UA,
            "CF-Connecting-IP": "203.0.113.7"
        },
        "cf": {
            "city": "Shanghai",
            "country": "CN",
            "continent": "AS",
            "region": "Shanghai",
            "timezone": "Asia/Shanghai",
            "asOrganization": "China Telecom",
            "latitude": "31.2304",
            "longitude": "121.4737"
        }
    });
    let event: InvocationEvent = serde_json::from_value(payload).expect("valid event");

    let response = handler(LambdaEvent::new(event, Context::default()))
        .await
        .expect("handler should succeed");

    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers["content-type"], JSON_CONTENT_TYPE);
    let body = body(&response);
    assert_eq!(body["ip"], "203.0.113.7");
    assert_eq!(body["os"], "Windows");
    assert_eq!(body["browser"], "Chrome");
    assert_eq!(body["isp"], "China Telecom");
    assert!(response.body.contains('\n'), "pretty printed");
}

#[test]
fn cf_context_takes_precedence_over_headers() {
    let mut headers = HashMap::new();
    headers.insert("cf-ipcity".to_string(), "Berlin".to_string());
    headers.insert("user-agent".to_string(), CHROME_WINDOWS_UA.to_string());

    let response = respond(
        &ProbeConfig::default(),
        InvocationEvent {
            headers,
            cf: Some(shanghai_cf()),
        },
    )
    .expect("response");

    let body = body(&response);
    assert_eq!(body["city"], "Shanghai");
    assert_eq!(body["address"], "CN, Shanghai, Shanghai");
    assert_eq!(body["targetLocationName"], "Beijing");
}

#[test]
fn falls_back_to_headers_without_cf() {
    let mut headers = HashMap::new();
    headers.insert("cf-ipcity".to_string(), "Shanghai".to_string());
    headers.insert("cf-iplatitude".to_string(), "31.2304".to_string());
    headers.insert("cf-iplongitude".to_string(), "121.4737".to_string());

    let config = ProbeConfig {
        target: TargetLocation::new("Shanghai", 31.2304, 121.4737).expect("valid target"),
        header_profile: HeaderProfile::Cloudflare,
    };
    let response = respond(&config, InvocationEvent { headers, cf: None }).expect("response");

    let body = body(&response);
    assert_eq!(body["city"], "Shanghai");
    assert_eq!(body["distance"], "about 0 km");
    assert_eq!(body["os"], "unknown");
}

#[test]
fn empty_event_degrades_to_unknown() {
    let response =
        respond(&ProbeConfig::default(), InvocationEvent::default()).expect("response");

    let body = body(&response);
    for key in ["ip", "country", "city", "continent", "timezone", "os", "browser", "isp", "distance"] {
        assert_eq!(body[key], "unknown", "{key}");
    }
    assert_eq!(body["address"], "unknown, unknown, unknown");
}

#[test]
fn unparseable_cf_coordinates_give_unknown_distance() {
    let mut cf = shanghai_cf();
    cf.latitude = Some("north".to_string());

    let response = respond(
        &ProbeConfig::default(),
        InvocationEvent {
            headers: HashMap::new(),
            cf: Some(cf),
        },
    )
    .expect("response");

    let body = body(&response);
    assert_eq!(body["distance"], "unknown");
    assert_eq!(body["city"], "Shanghai");
}

#[tokio::test]
async fn malformed_event_still_answers_with_unknowns() {
    let payload = json!({
        "headers": null,
        "cf": { "city": ["Shanghai"], "latitude": true, "longitude": "121.4737", "country": "CN" }
    });
    let event: InvocationEvent = serde_json::from_value(payload).expect("lenient event");

    let response = handler(LambdaEvent::new(event, Context::default()))
        .await
        .expect("handler should succeed");

    assert_eq!(response.status_code, 200);
    let body = body(&response);
    assert_eq!(body["country"], "CN");
    assert_eq!(body["city"], "unknown");
    assert_eq!(body["distance"], "unknown");
    assert_eq!(body["ip"], "unknown");
    assert_eq!(body["os"], "unknown");
}
