//! Tracing initialization for the Lambda function.
//!
//! Configures JSON-formatted tracing output suitable for CloudWatch Logs.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with flattened JSON events for CloudWatch Logs.
///
/// Call once at the start of `main`, before `lambda_runtime::run()`.
/// `RUST_LOG` controls the level and defaults to `info`. A subscriber that is
/// already installed is left in place and the refusal is logged at debug.
///
/// # Example
///
/// ```no_run
/// use geoprobe_lambda::init_tracing;
///
/// #[tokio::main]
/// async fn main() -> Result<(), lambda_runtime::Error> {
///     init_tracing();
///     Ok(())
/// }
/// ```
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .flatten_event(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        tracing::debug!(error = %e, "tracing subscriber already installed, keeping it");
    }
}
