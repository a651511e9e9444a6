//! Structured logging setup for services embedding the calculator.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::HarvestError;

/// Build the log filter: `RUST_LOG` when set, else the configured level,
/// else `info`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global `tracing` subscriber.
///
/// Call once at startup. Fails if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), HarvestError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| HarvestError::Telemetry {
        message: e.to_string(),
    })
}
