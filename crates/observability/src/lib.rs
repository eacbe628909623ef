//! Tracing/logging setup shared by the stockroom binaries.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: quiet dependencies, but keep the
/// store's conflict-retry diagnostics visible.
const DEFAULT_FILTER: &str = "info,stockroom_store=debug";

/// Initialize process-wide tracing/logging.
///
/// JSON lines on stdout; `RUST_LOG` overrides [`DEFAULT_FILTER`]. Safe to
/// call multiple times; subsequent calls become no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
