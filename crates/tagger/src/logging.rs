//! Logging initialization.
//!
//! Logs go to stderr so stdout stays reserved for reports. `RUST_LOG`
//! overrides the level chosen here.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber with `default_level` as the fallback filter.
pub fn init(default_level: &str, json_format: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize from the `[logging]` config section; `--verbose` forces debug
/// and `--json-logs` forces JSON.
pub fn init_from_config(config: &tagger_core::Config, verbose: bool, json_logs: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let json_format = json_logs || config.logging.format == "json";
    init(level, json_format);
}
