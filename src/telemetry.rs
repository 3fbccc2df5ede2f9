//! Process-local tracing setup for hosts that don't install their own
//! subscriber.

use crate::config::LogLevel;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Install a global tracing subscriber once. Later calls (and hosts that
/// already installed a subscriber) are no-ops.
pub fn init(level: LogLevel) {
    INIT.call_once(|| {
        let default_level: tracing::Level = level.into();
        // Quiet the HTTP stack by default; RUST_LOG-style directives can
        // still override through EnvFilter's env support
        let filter = EnvFilter::try_new(format!(
            "{default_level},hyper=warn,reqwest=warn,h2=warn"
        ))
        .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).compact());

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
