//! Tracing bootstrap for binaries and harnesses embedding the portal crates.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (for example `"portal_core=info"`).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

