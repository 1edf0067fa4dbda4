//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honors `RUST_LOG`; calling it more than once is harmless.
pub fn init() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
