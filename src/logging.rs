//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber. Logs go to stderr because stdout may carry the CSV or JSON
//! output.
//!
//! # Log Levels
//!
//! - `error`: nothing below fatal errors (`-q`)
//! - `warn`: skipped rows, unlinked close approaches (default)
//! - `info`: per-stage record counts (`-v`)
//! - `debug`: per-record detail such as each unlinked designation (`-vv`)
//!
//! `RUST_LOG`, when set, overrides the level chosen on the command line.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map `-v` occurrences and `-q` onto a level filter
pub fn verbosity_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global stderr subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_logging(level: LevelFilter) -> Result<(), String> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
