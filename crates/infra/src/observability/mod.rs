//! Logging and tracing setup
//!
//! Installs a `tracing-subscriber` pipeline filtered by `RUST_LOG`
//! (default `info`). Spans and events never carry tokens or secrets.

use calsift_domain::{CalSiftError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global subscriber; `json` switches to one JSON object per
/// line.
///
/// # Errors
/// Returns `CalSiftError::Internal` if a global subscriber is already set.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(fmt::layer().json().with_target(true).with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(fmt::layer().with_target(false).with_writer(std::io::stderr)).try_init()
    };

    installed.map_err(|e| CalSiftError::Internal(format!("failed to install tracing subscriber: {e}")))
}
