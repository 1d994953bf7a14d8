//! Logging utilities

pub use log::{debug, error, info, trace, warn};

use crate::core::config::LoggingConfig;

/// Initialize the logging system
///
/// The configured level is applied first; `RUST_LOG` overrides it when set.
/// Fails if a global logger has already been installed.
pub fn init(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new()
        .parse_filters(&config.level)
        .parse_env("RUST_LOG")
        .try_init()
}
