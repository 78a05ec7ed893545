//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set. Otherwise the level comes from `-v`/`-q`, then
//! the configured level (which already folds in `NBPORT_LOG_LEVEL`).
//! Logs always go to stderr so stdout carries only the run report.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogLevel;

/// Pick the effective level from CLI flags and configuration
pub fn effective_level(configured: LogLevel, verbose: u8, quiet: bool) -> LogLevel {
    if quiet {
        LogLevel::Error
    } else {
        match verbose {
            0 => configured,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Install the global subscriber (idempotent)
pub fn init(level: LogLevel) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(format!("nbport={}", level.as_filter()))
                .unwrap_or_else(|_| EnvFilter::new("nbport=info"))
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init();
    });
}
