//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "INSPECTOR_LOG";

/// Filter used when `INSPECTOR_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "inspector=info";

/// Initialize the Inspector tracing/logging system.
///
/// Reads `INSPECTOR_LOG` for per-subsystem log levels, e.g.
/// `INSPECTOR_LOG=inspector_analysis::patterns=debug,inspector_analysis::scanner=warn`.
///
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by an embedding host.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_a_no_op() {
        init_tracing();
        init_tracing();
        tracing::info!(target: "inspector_core", "tracing initialized");
        assert!(INIT.is_completed());
    }
}
