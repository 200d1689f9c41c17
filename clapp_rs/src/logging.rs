//! Tracing subscriber setup for binaries built on the toolkit.
//!
//! Library code only emits `tracing` events; nothing is printed unless a
//! binary installs a subscriber. Logs go to stderr so they never mix with
//! command output or progress frames on stdout.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `default_level`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
