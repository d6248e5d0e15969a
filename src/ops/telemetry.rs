// * Telemetry - structured logging setup
// * Human-readable output by default, JSON lines for log shippers

use crate::config::LogLevel;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter for the requested level. `RUST_LOG` wins when set.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Initializes the global tracing subscriber.
///
/// # Example
/// ```ignore
/// use doc_titler::config::LogLevel;
/// use doc_titler::ops::telemetry;
///
/// telemetry::init_tracing(LogLevel::Info, false);
/// tracing::info!(doc_id = 42, "Processing document");
/// ```
pub fn init_tracing(level: LogLevel, json: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}
