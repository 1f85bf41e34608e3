//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging with the default `info` filter.
///
/// Safe to call multiple times (subsequent calls are no-ops), so tests and
/// embedding binaries can call it unconditionally.
pub fn init() {
    init_with_default_filter("info");
}

/// Initialize tracing/logging, falling back to `default_filter` when
/// `RUST_LOG` is unset. JSON output, timestamped.
pub fn init_with_default_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
