//! Report configuration.

use crate::smbus::DeviceUri;

/// Options that change how decoded values are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Append the names of set bits to BatteryMode and BatteryStatus.
    pub decode_flags: bool,
}

/// Everything needed for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Adapter to open.
    pub device: DeviceUri,
    /// Enable SMBus Packet Error Checking before the first read.
    pub packet_error_checking: bool,
    pub options: ReportOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            device: DeviceUri::default(),
            packet_error_checking: true,
            options: ReportOptions::default(),
        }
    }
}
