//! Structured logging via the `tracing` crate.
//!
//! Initialization is idempotent so the server binary, integration tests,
//! and benches can all call it without coordinating.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber with an env-driven filter.
///
/// Honors `RUST_LOG`; defaults to `info` when unset. Safe to call more than
/// once: only the first call installs a subscriber.
pub fn init_tracing_default() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}
