//! # Bitfield Registers
//!
//! Named bits of BatteryMode (0x03) and BatteryStatus (0x16), used to annotate
//! the raw hex values in the report.

use bitflags::bitflags;

bitflags! {
    /// BatteryMode register bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BatteryMode: u16 {
        const INTERNAL_CHARGE_CONTROLLER = 1 << 0;
        const PRIMARY_BATTERY_SUPPORT    = 1 << 1;
        /// Conditioning cycle requested.
        const CONDITION_FLAG             = 1 << 7;
        const CHARGE_CONTROLLER_ENABLED  = 1 << 8;
        const PRIMARY_BATTERY            = 1 << 9;
        /// AlarmWarning broadcasts disabled.
        const ALARM_MODE                 = 1 << 13;
        /// ChargingCurrent/ChargingVoltage broadcasts disabled.
        const CHARGER_MODE               = 1 << 14;
        /// Capacity reported in 10 mWh instead of mAh.
        const CAPACITY_MODE              = 1 << 15;
    }
}

bitflags! {
    /// BatteryStatus register bits. The low nibble carries an error code
    /// and is not part of the flag set, see [`StatusErrorCode`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BatteryStatus: u16 {
        const FULLY_DISCHARGED          = 1 << 4;
        const FULLY_CHARGED             = 1 << 5;
        const DISCHARGING               = 1 << 6;
        const INITIALIZED               = 1 << 7;
        const REMAINING_TIME_ALARM      = 1 << 8;
        const REMAINING_CAPACITY_ALARM  = 1 << 9;
        const TERMINATE_DISCHARGE_ALARM = 1 << 11;
        const OVER_TEMP_ALARM           = 1 << 12;
        const TERMINATE_CHARGE_ALARM    = 1 << 14;
        const OVER_CHARGED_ALARM        = 1 << 15;
    }
}

/// Result code of the last SMBus command, low nibble of BatteryStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusErrorCode {
    Ok,
    Busy,
    ReservedCommand,
    UnsupportedCommand,
    AccessDenied,
    OverUnderflow,
    BadSize,
    Unknown,
}

impl StatusErrorCode {
    pub fn from_status(raw: u16) -> Self {
        match raw & 0x000F {
            0 => StatusErrorCode::Ok,
            1 => StatusErrorCode::Busy,
            2 => StatusErrorCode::ReservedCommand,
            3 => StatusErrorCode::UnsupportedCommand,
            4 => StatusErrorCode::AccessDenied,
            5 => StatusErrorCode::OverUnderflow,
            6 => StatusErrorCode::BadSize,
            _ => StatusErrorCode::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusErrorCode::Ok => "OK",
            StatusErrorCode::Busy => "BUSY",
            StatusErrorCode::ReservedCommand => "RESERVED_COMMAND",
            StatusErrorCode::UnsupportedCommand => "UNSUPPORTED_COMMAND",
            StatusErrorCode::AccessDenied => "ACCESS_DENIED",
            StatusErrorCode::OverUnderflow => "OVER_UNDERFLOW",
            StatusErrorCode::BadSize => "BAD_SIZE",
            StatusErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(" | ")
}

/// Bracketed list of the BatteryMode bits set in `raw`.
pub fn describe_battery_mode(raw: u16) -> String {
    let mode = BatteryMode::from_bits_truncate(raw);
    format!("[{}]", join_names(mode.iter_names().map(|(name, _)| name)))
}

/// Bracketed list of the BatteryStatus bits set in `raw`, plus its error code.
pub fn describe_battery_status(raw: u16) -> String {
    let status = BatteryStatus::from_bits_truncate(raw);
    let names = join_names(status.iter_names().map(|(name, _)| name));
    let code = StatusErrorCode::from_status(raw).name();

    if names.is_empty() {
        format!("[error: {code}]")
    } else {
        format!("[{names}, error: {code}]")
    }
}
