//! Unit tests for the logging helpers in the `sbs-rs` crate.

use sbs_rs::logging::{init_logger, log_debug, log_info};

/// Tests that the logging helpers do not panic, before and after init.
#[test]
fn test_logging() {
    log_info("This is an info message");
    init_logger();
    log_info("This is an info message");
    log_debug("This is a debug message");
}

/// Tests that initializing the logger twice is harmless.
#[test]
fn test_init_logger_twice() {
    init_logger();
    init_logger();
}
