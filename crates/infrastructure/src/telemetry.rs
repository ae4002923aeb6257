//! Telemetry setup
//!
//! Installs the global tracing subscriber. Filtering follows `RUST_LOG`
//! when set and defaults to `info` otherwise.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
