//! AWS Lambda function answering with the caller's visitor report.
//!
//! Each invocation carries the request headers and, optionally, the edge
//! context the platform attached to the request. The function replies with a
//! Lambda proxy response whose body is the pretty-printed report.

#![deny(warnings)]

mod models;
mod runtime;
mod tracing_init;

use lambda_runtime::{Error, LambdaEvent};
use tracing::{debug, info};

use geoprobe_lib::{build_report, ProbeConfig, VisitorRequest};

pub use models::{InvocationEvent, ProxyResponse, JSON_CONTENT_TYPE};
pub use runtime::{get_runtime, init_runtime, init_runtime_with, InitError, LambdaRuntime};
pub use tracing_init::init_tracing;

/// Lambda entry point used with `lambda_runtime::service_fn`.
///
/// Uses the runtime initialized at cold start, initializing it from the
/// environment if `main` has not done so.
pub async fn handler(event: LambdaEvent<InvocationEvent>) -> Result<ProxyResponse, Error> {
    let request_id = event.context.request_id.clone();
    let runtime = match get_runtime() {
        Ok(runtime) => runtime,
        Err(_) => init_runtime()?,
    };

    let response = respond(runtime.config(), event.payload)?;
    debug!(request_id = %request_id, "invocation complete");
    Ok(response)
}

/// Build the proxy response for one event under `config`.
pub fn respond(config: &ProbeConfig, event: InvocationEvent) -> Result<ProxyResponse, Error> {
    let mut request = VisitorRequest::from_headers(&event.headers, config.header_profile);
    if let Some(context) = event.cf {
        request = request.with_context(context);
    }

    let report = build_report(&request, &config.target);
    info!(
        os = %report.os,
        browser = %report.browser,
        country = %report.country,
        distance = %report.distance,
        "visitor report served"
    );

    Ok(ProxyResponse::json(report.to_pretty_json()?))
}
