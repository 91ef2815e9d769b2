//! Logging to stderr via env_logger
//!
//! The level comes from `RUST_LOG` and defaults to `warn`, so rendered
//! diffs on stdout stay clean.

use env_logger::Env;

/// Initialize the global logger
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
