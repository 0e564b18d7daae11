//! Structured logging initialization.
//!
//! Uses the `tracing` ecosystem. `RUST_LOG` wins when set; otherwise the
//! configured level applies to this crate and the HTTP trace layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once at startup; a second call panics, so tests that need logs
/// should rely on `RUST_LOG` with their own harness instead.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("cwa_proxy={log_level},tower_http={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
