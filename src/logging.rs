//! Tracing setup for the CLI.
//!
//! Logs go to stderr so they never mix with menu output on stdout.
//! `RUST_LOG` takes precedence over the `-v` count.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: u8) {
    let fallback_level = level_for_verbosity(verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("taskboard={fallback_level}")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
