//! Tracing setup for binaries and tests embedding the groups core.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_level`. Returns the filter string actually applied.
///
/// Only the first call installs a subscriber; later calls leave the existing
/// one in place and still return the filter they would have used.
pub fn init_logging(default_level: &str) -> String {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    let (filter, applied) = match EnvFilter::try_new(&level) {
        Ok(filter) => (filter, level),
        Err(_) => (EnvFilter::new("info"), "info".to_string()),
    };

    // Err only means a global subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    applied
}
