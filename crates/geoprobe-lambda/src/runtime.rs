//! Process-wide Lambda runtime state.
//!
//! Configuration is resolved from the environment once per cold start and
//! reused by every invocation served by the same execution environment.

use std::sync::OnceLock;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info};

use geoprobe_lib::ProbeConfig;

static RUNTIME: OnceLock<Result<LambdaRuntime, InitError>> = OnceLock::new();

/// Error during runtime initialization.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InitError {
    #[error("Lambda initialization failed: {0}")]
    InvalidConfig(#[from] geoprobe_lib::Error),

    #[error("Lambda runtime not initialized")]
    NotInitialized,
}

/// Initialized Lambda runtime holding the resolved configuration.
#[derive(Debug)]
pub struct LambdaRuntime {
    config: ProbeConfig,
}

impl LambdaRuntime {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }
}

/// Initialize the runtime from the process environment.
///
/// The first call resolves configuration; later calls return the same
/// outcome, including a failed one.
pub fn init_runtime() -> Result<&'static LambdaRuntime, InitError> {
    init_runtime_with(ProbeConfig::from_env)
}

/// Initialize the runtime with a custom configuration source.
pub fn init_runtime_with<F>(load: F) -> Result<&'static LambdaRuntime, InitError>
where
    F: FnOnce() -> geoprobe_lib::Result<ProbeConfig>,
{
    let result = RUNTIME.get_or_init(|| {
        let start = Instant::now();
        let config = load()?;
        info!(
            target_location = %config.target.name,
            header_profile = %config.header_profile,
            init_ms = start.elapsed().as_millis(),
            "Lambda runtime initialization complete"
        );
        Ok(LambdaRuntime::new(config))
    });

    result.as_ref().map_err(|e| {
        error!(error = %e, "Lambda runtime initialization failed");
        e.clone()
    })
}

/// Get the initialized runtime.
pub fn get_runtime() -> Result<&'static LambdaRuntime, InitError> {
    match RUNTIME.get() {
        Some(Ok(runtime)) => Ok(runtime),
        Some(Err(e)) => Err(e.clone()),
        None => Err(InitError::NotInitialized),
    }
}
