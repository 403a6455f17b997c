//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter directive for a verbosity setting
///
/// `RUST_LOG` takes precedence when set.
pub const fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, true) => "canalbuilder=debug,info",
        (false, false) => "info",
    }
}

/// Install a formatting subscriber on stderr
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(quiet: bool, verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
