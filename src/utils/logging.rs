use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Initialise the tracing stack: env-filtered (RUST_LOG, default `info`),
/// human-readable output with targets.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default().with(env_filter).with(fmt::layer().with_target(true)).init();
}
