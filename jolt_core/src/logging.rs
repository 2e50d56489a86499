//! Tracing setup for the `jolt` binary.
//!
//! Log lines go to stderr so that command output on stdout (including
//! `--json`) stays machine readable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level the CLI installs when RUST_LOG is unset
///
/// Only problems with the data are shown by default: skipped event lines,
/// replaced timestamps and substances missing from the catalog.
pub const CLI_DEFAULT_LEVEL: &str = "warn";

/// Install a compact stderr subscriber filtered at `default_level`
///
/// A RUST_LOG value takes precedence, e.g. `RUST_LOG=jolt_core=debug` to see
/// which event log and "now" a command used.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route logs through the test harness at debug level
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
