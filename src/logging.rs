//! Tracing initialization
//!
//! The SDK logs through `tracing` and never installs a subscriber on its
//! own: a host application that already set one up keeps it. [`init`] is
//! for processes where this crate is the main event (the CLI, tests).

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize a global subscriber at `level`, overridable via `RUST_LOG`.
///
/// Does nothing if a subscriber is already installed.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
