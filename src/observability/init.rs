//! Tracing subscriber initialization.
//!
//! Sets up structured logging for the core: an `EnvFilter` built from the
//! configured level (or `RUST_LOG` when set), feeding a compact fmt layer on
//! stderr. Initialization is idempotent: hosts and tests may call it any
//! number of times and only the first call installs a subscriber.

use crate::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither config nor `RUST_LOG` specifies one.
const DEFAULT_FILTER: &str = "info";

/// Initializes the global tracing subscriber from configuration.
///
/// `RUST_LOG` takes precedence over the configured level so an operator can
/// raise verbosity without touching the config file. A second call is a no-op.
pub fn init_tracing(config: &Config) {
    let fallback = config.trace_level.as_deref().unwrap_or(DEFAULT_FILTER);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let result = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if result.is_ok() {
        tracing::debug!(level = %fallback, "tracing initialized");
    }
}
