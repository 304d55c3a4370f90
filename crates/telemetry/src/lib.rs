//! vr-telemetry - logging setup
//!
//! All log output goes to stderr; stdout is reserved for the resource response.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vr_config::LogFormat;

/// Initialize tracing. `RUST_LOG` takes precedence over `log_level`.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

/// Initialize JSON-formatted tracing for log collectors
pub fn init_tracing_json(log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Initialize tracing in the requested format
pub fn init(format: LogFormat, log_level: &str) {
    match format {
        LogFormat::Text => init_tracing(log_level),
        LogFormat::Json => init_tracing_json(log_level),
    }
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}
