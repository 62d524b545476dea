//! # sbs-rs - A Rust Crate for Smart Battery System (SBS) Reports
//!
//! The sbs-rs crate reads the register map of a Smart Battery over SMBus and
//! decodes it into a human-readable report, in the spirit of a diagnostic
//! dump: every register is read once, and a register that cannot be read is
//! marked as such without stopping the report.
//!
//! ## Features
//!
//! - Decode SBS word registers with their units: temperature in degC, signed
//!   currents, capacities, run times, state of charge
//! - Decode the string blocks (manufacturer, device name, chemistry) and the
//!   packed manufacture date
//! - Classify the ManufacturerData block as raw bytes or per-cell voltages
//!   based on its length
//! - Optional names for the BatteryMode and BatteryStatus bits
//! - SMBus access through Linux i2c-dev, or replay of a JSON register dump
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```rust
//! use sbs_rs::{generate_report, RegisterMapAdapter, ReportOptions};
//!
//! # tokio_test::block_on(async {
//! let mut adapter = RegisterMapAdapter::new()
//!     .with_block(0x20, "SANYO")
//!     .with_word(0x08, 3000);
//!
//! let report = generate_report(&mut adapter, true, ReportOptions::default()).await;
//! assert!(report.to_string().contains("26.85 degC"));
//! # });
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod report;
pub mod sbs;
pub mod smbus;
pub mod util;

pub use crate::config::{ReportConfig, ReportOptions};
pub use crate::error::SbsError;
pub use crate::logging::{init_logger, log_debug, log_info};

pub use report::{generate_report, FieldValue, Report, ReportDecoder, ReportField};
pub use sbs::{DateCode, SbsRegister, Unit, VendorExtensionRecord};
pub use smbus::{open_adapter, AdapterVersion, DeviceUri, RegisterMapAdapter, SmbusAdapter};

/// Open the adapter described by a device URI string.
///
/// # Arguments
/// * `device` - Device URI, e.g. "i2cdev:///dev/i2c-7"
///
/// # Returns
/// * `Ok(Box<dyn SmbusAdapter>)` - Open adapter session
/// * `Err(SbsError)` - The URI is invalid or the adapter could not be opened
pub async fn connect(device: &str) -> Result<Box<dyn SmbusAdapter>, SbsError> {
    let uri: DeviceUri = device.parse()?;
    open_adapter(&uri).await
}

/// Open the configured adapter and produce one report.
///
/// # Arguments
/// * `config` - Device, PEC and rendering options
///
/// # Returns
/// * `Ok((Option<AdapterVersion>, Report))` - Adapter firmware version and the report
/// * `Err(SbsError)` - The adapter could not be opened; nothing was read
pub async fn run_report(config: &ReportConfig) -> Result<(Option<AdapterVersion>, Report), SbsError> {
    let mut adapter = open_adapter(&config.device).await?;
    let version = adapter.version();
    let report = generate_report(
        adapter.as_mut(),
        config.packet_error_checking,
        config.options,
    )
    .await;
    Ok((version, report))
}
