//! SBS Protocol Constants
//!
//! This module defines constants used by the Smart Battery System report,
//! based on the Smart Battery Data Specification (SBS 1.1).

/// SMBus address of the smart battery (8-bit write form).
pub const SBS_BATTERY_ADDRESS: u8 = 0x16;

/// The same address in 7-bit form, as expected by Linux i2c-dev.
pub const SBS_BATTERY_ADDRESS_7BIT: u8 = SBS_BATTERY_ADDRESS >> 1;

// ----------------------------------------------------------------------------
// Register (command code) indices
// ----------------------------------------------------------------------------

pub const SBS_MANUFACTURER_ACCESS: u8 = 0x00;
pub const SBS_REMAINING_CAPACITY_ALARM: u8 = 0x01;
pub const SBS_REMAINING_TIME_ALARM: u8 = 0x02;
pub const SBS_BATTERY_MODE: u8 = 0x03;
pub const SBS_AT_RATE: u8 = 0x04;
pub const SBS_AT_RATE_TIME_TO_FULL: u8 = 0x05;
pub const SBS_AT_RATE_TIME_TO_EMPTY: u8 = 0x06;
pub const SBS_AT_RATE_OK: u8 = 0x07;
pub const SBS_TEMPERATURE: u8 = 0x08;
pub const SBS_VOLTAGE: u8 = 0x09;
pub const SBS_CURRENT: u8 = 0x0A;
pub const SBS_AVERAGE_CURRENT: u8 = 0x0B;
pub const SBS_MAX_ERROR: u8 = 0x0C;
pub const SBS_RELATIVE_STATE_OF_CHARGE: u8 = 0x0D;
pub const SBS_ABSOLUTE_STATE_OF_CHARGE: u8 = 0x0E;
pub const SBS_REMAINING_CAPACITY: u8 = 0x0F;
pub const SBS_FULL_CHARGE_CAPACITY: u8 = 0x10;
pub const SBS_RUN_TIME_TO_EMPTY: u8 = 0x11;
pub const SBS_AVERAGE_TIME_TO_EMPTY: u8 = 0x12;
pub const SBS_AVERAGE_TIME_TO_FULL: u8 = 0x13;
pub const SBS_CHARGING_CURRENT: u8 = 0x14;
pub const SBS_CHARGING_VOLTAGE: u8 = 0x15;
pub const SBS_BATTERY_STATUS: u8 = 0x16;
pub const SBS_CYCLE_COUNT: u8 = 0x17;
pub const SBS_MANUFACTURE_DATE: u8 = 0x1B;
pub const SBS_SERIAL_NUMBER: u8 = 0x1C;
pub const SBS_MANUFACTURER_NAME: u8 = 0x20;
pub const SBS_DEVICE_NAME: u8 = 0x21;
pub const SBS_DEVICE_CHEMISTRY: u8 = 0x22;
pub const SBS_MANUFACTURER_DATA: u8 = 0x23;

// ----------------------------------------------------------------------------
// Block reads
// ----------------------------------------------------------------------------

/// Size of the scratch buffer handed to block reads.
pub const SBS_BLOCK_BUFFER_SIZE: usize = 256;

/// Largest payload an SMBus block read can return (length byte is a u8).
pub const SBS_BLOCK_MAX_LEN: usize = 255;

/// Minimum manufacturer data length for the structured cell-voltage layout.
pub const SBS_VENDOR_STRUCTURED_LEN: usize = 14;

/// Offset of the first cell voltage word inside the structured layout.
pub const SBS_VENDOR_CELL_VOLTAGE_OFFSET: usize = 4;

/// Number of cell voltage words in the structured layout.
pub const SBS_VENDOR_CELL_COUNT: usize = 4;

// ----------------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------------

/// Base year of the packed manufacture date.
pub const SBS_DATE_EPOCH_YEAR: u16 = 1980;

/// 0 degC expressed in Kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Placeholder rendered for a register that could not be read.
pub const SBS_ERROR_PLACEHOLDER: &str = "ERROR";

// ----------------------------------------------------------------------------
// Devices
// ----------------------------------------------------------------------------

/// Default adapter: FX2LP based SMBusb dongle.
pub const DEFAULT_DEVICE_URI: &str = "fx2lp://vid=0x04b4,pid=0x8613";

/// Default USB vendor id of the FX2LP adapter.
pub const DEFAULT_FX2LP_VID: u16 = 0x04b4;

/// Default USB product id of the FX2LP adapter.
pub const DEFAULT_FX2LP_PID: u16 = 0x8613;
