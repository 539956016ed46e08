//! Telemetry helpers for structured logging.

/// Install a default env-filtered fmt subscriber. A no-op when the caller
/// already set their own dispatcher.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
