//! # Telemetry Module
//!
//! Tracing subscriber setup. The catalog core logs through `tracing`
//! throughout (cache hits and misses at debug, degraded cache operations at
//! warn); binaries and tests call [`try_init`] once to get formatted output
//! filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Idempotent: a second call (e.g. from another test in the same process)
/// is a no-op rather than a panic.
pub fn try_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
