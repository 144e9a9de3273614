//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the level passed by the caller, so a
//! one-off `RUST_LOG=debug` run works without touching any config.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global fmt subscriber at the given default level.
/// Fails if a subscriber is already installed.
pub fn init(level: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logger(format!("invalid log level {level:?}: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logger(e.to_string()))
}
