//! Logging setup
//!
//! Everything goes through `simple_logger`; `tracing` events reach it via the
//! `log` feature.

use simple_logger::SimpleLogger;
use tracing::log::{LevelFilter, SetLoggerError};

/// Crates that are chatty at info/debug when serving images and encoding PNGs.
/// Only consulted outside of debug mode.
const NOISY_MODULES: &[(&str, LevelFilter)] = &[
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("png", LevelFilter::Warn),
    ("tower_http", LevelFilter::Info),
    ("tracing", LevelFilter::Warn),
];

fn log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn build_logger(debug: bool) -> SimpleLogger {
    let logger = SimpleLogger::new().with_level(log_level(debug));
    if debug {
        return logger;
    }
    NOISY_MODULES
        .iter()
        .fold(logger, |logger, (module, level)| {
            logger.with_module_level(module, *level)
        })
}

/// Installs the global logger: debug level with `debug`, info otherwise.
///
/// Fails if a logger is already installed.
pub fn setup_logging(debug: bool) -> Result<(), SetLoggerError> {
    build_logger(debug).init()
}
