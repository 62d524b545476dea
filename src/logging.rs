use log::{debug, info, log_enabled, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// Output goes to stderr so it never interleaves with the report on stdout.
/// Verbosity is controlled through `RUST_LOG`.
pub fn init_logger() {
    // A second call (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}
