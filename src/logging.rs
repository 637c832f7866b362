//! Tracing setup for native tools.

use crate::config::LogLevel;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

pub type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

/// A non-empty `RUST_LOG` wins over the configured level.
pub fn filter_directive(rust_log: Option<String>, level: LogLevel) -> String {
    rust_log
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| level.as_filter_str().to_string())
}

fn build_filter(rust_log: Option<String>, level: LogLevel) -> EnvFilter {
    EnvFilter::try_new(filter_directive(rust_log, level))
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
}

pub fn env_filter(level: LogLevel) -> EnvFilter {
    build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), level)
}

/// Install the global subscriber. Returns a handle for changing the level
/// later; `None` if a subscriber was already installed.
pub fn init_tracing(level: LogLevel) -> Option<ReloadHandle> {
    let (filter_layer, handle) = reload::Layer::new(env_filter(level));
    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .try_init()
        .is_ok();
    if !installed {
        return None;
    }
    info!(%level, "Logging initialized; override with config log_level or RUST_LOG");
    Some(handle)
}

pub fn set_log_level(handle: &ReloadHandle, level: LogLevel) {
    let parsed = env_filter(level);
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level: {err}");
    } else {
        info!(%level, "Applied log level");
    }
}
