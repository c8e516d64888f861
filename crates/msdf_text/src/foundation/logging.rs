//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Panics if a global logger is already installed; see [`try_init`].
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system if no logger is installed yet
///
/// Returns `false` when another logger was already registered.
pub fn try_init() -> bool {
    env_logger::builder().is_test(cfg!(test)).try_init().is_ok()
}
