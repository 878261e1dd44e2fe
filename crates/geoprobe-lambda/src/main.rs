//! geoprobe AWS Lambda binary.

use lambda_runtime::{service_fn, Error};

use geoprobe_lambda::{handler, init_runtime, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    // Resolve configuration at cold start so a bad environment fails fast.
    init_runtime()?;

    lambda_runtime::run(service_fn(handler)).await
}
