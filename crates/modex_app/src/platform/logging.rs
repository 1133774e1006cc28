//! Logger setup for the modex binary.
//!
//! Logs go to `log_file` by default so they do not interleave with the REPL.

use super::config::AppConfig;

pub fn initialize(config: &AppConfig) {
    modex_logging::initialize(
        config.log_destination,
        config.log_level.into(),
        &config.log_file,
    );
}
