//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with an explicit default filter
///
/// `RUST_LOG` still takes precedence when it is set. Repeated calls are
/// ignored, so tools and tests can call this freely.
pub fn init_with_filter(filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .try_init();
}
