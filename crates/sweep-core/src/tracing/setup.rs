//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "SWEEP_LOG";

/// Filter used when `SWEEP_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "sweep=info";

/// Initialize the sweep tracing/logging system.
///
/// Reads `SWEEP_LOG` for per-module log levels, for example
/// `SWEEP_LOG=sweep_engine::traversal=debug,sweep_engine::processor=info`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host tool.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
