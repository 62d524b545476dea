//! # SBS Register Map
//!
//! The closed set of Smart Battery registers read by the report, together with
//! the static metadata that drives decoding: label, access kind, and how the
//! raw value is interpreted.

use crate::constants::*;
use crate::error::SbsError;

/// How a register is transferred on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
    /// SMBus Read Word: a single 16-bit little-endian value.
    Word,
    /// SMBus Block Read: a length byte followed by up to 255 data bytes.
    Block,
}

/// Engineering unit attached to a scalar reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Capacity; mAh or 10 mWh depending on CAPACITY_MODE.
    Capacity,
    Minutes,
    MilliVolts,
    MilliAmps,
    Percent,
    DegreesCelsius,
    /// Dimensionless count or flag.
    None,
}

impl Unit {
    /// The suffix printed after the value, or `None` for dimensionless fields.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Unit::Capacity => Some("mAh(/10mWh)"),
            Unit::Minutes => Some("min"),
            Unit::MilliVolts => Some("mV"),
            Unit::MilliAmps => Some("mA"),
            Unit::Percent => Some("%"),
            Unit::DegreesCelsius => Some("degC"),
            Unit::None => None,
        }
    }
}

/// Interpretation applied to the raw register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Unsigned 16-bit integer.
    Unsigned(Unit),
    /// Two's-complement 16-bit integer.
    Signed(Unit),
    /// Raw bitfield, shown as four hex digits.
    Bitfield,
    /// Temperature in 0.1 K, shown in degC.
    DeciKelvin,
    /// Packed manufacture date.
    DateCode,
    /// NUL-terminated string block.
    Text,
    /// Manufacturer data block, format inferred from its length.
    VendorData,
}

/// A Smart Battery register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SbsRegister {
    ManufacturerAccess,
    RemainingCapacityAlarm,
    RemainingTimeAlarm,
    BatteryMode,
    AtRate,
    AtRateTimeToFull,
    AtRateTimeToEmpty,
    AtRateOk,
    Temperature,
    Voltage,
    Current,
    AverageCurrent,
    MaxError,
    RelativeStateOfCharge,
    AbsoluteStateOfCharge,
    RemainingCapacity,
    FullChargeCapacity,
    RunTimeToEmpty,
    AverageTimeToEmpty,
    AverageTimeToFull,
    ChargingCurrent,
    ChargingVoltage,
    BatteryStatus,
    CycleCount,
    ManufactureDate,
    SerialNumber,
    ManufacturerName,
    DeviceName,
    DeviceChemistry,
    ManufacturerData,
}

impl SbsRegister {
    /// Every register, in ascending index order.
    pub const ALL: [SbsRegister; 30] = [
        SbsRegister::ManufacturerAccess,
        SbsRegister::RemainingCapacityAlarm,
        SbsRegister::RemainingTimeAlarm,
        SbsRegister::BatteryMode,
        SbsRegister::AtRate,
        SbsRegister::AtRateTimeToFull,
        SbsRegister::AtRateTimeToEmpty,
        SbsRegister::AtRateOk,
        SbsRegister::Temperature,
        SbsRegister::Voltage,
        SbsRegister::Current,
        SbsRegister::AverageCurrent,
        SbsRegister::MaxError,
        SbsRegister::RelativeStateOfCharge,
        SbsRegister::AbsoluteStateOfCharge,
        SbsRegister::RemainingCapacity,
        SbsRegister::FullChargeCapacity,
        SbsRegister::RunTimeToEmpty,
        SbsRegister::AverageTimeToEmpty,
        SbsRegister::AverageTimeToFull,
        SbsRegister::ChargingCurrent,
        SbsRegister::ChargingVoltage,
        SbsRegister::BatteryStatus,
        SbsRegister::CycleCount,
        SbsRegister::ManufactureDate,
        SbsRegister::SerialNumber,
        SbsRegister::ManufacturerName,
        SbsRegister::DeviceName,
        SbsRegister::DeviceChemistry,
        SbsRegister::ManufacturerData,
    ];

    /// Order in which registers appear in the report.
    ///
    /// Static battery information first, then the telemetry words, then the
    /// manufacturer data block.
    pub const REPORT_ORDER: [SbsRegister; 30] = [
        SbsRegister::ManufacturerName,
        SbsRegister::DeviceName,
        SbsRegister::DeviceChemistry,
        SbsRegister::SerialNumber,
        SbsRegister::ManufactureDate,
        SbsRegister::ManufacturerAccess,
        SbsRegister::RemainingCapacityAlarm,
        SbsRegister::RemainingTimeAlarm,
        SbsRegister::BatteryMode,
        SbsRegister::AtRate,
        SbsRegister::AtRateTimeToFull,
        SbsRegister::AtRateTimeToEmpty,
        SbsRegister::AtRateOk,
        SbsRegister::Temperature,
        SbsRegister::Voltage,
        SbsRegister::Current,
        SbsRegister::AverageCurrent,
        SbsRegister::MaxError,
        SbsRegister::RelativeStateOfCharge,
        SbsRegister::AbsoluteStateOfCharge,
        SbsRegister::RemainingCapacity,
        SbsRegister::FullChargeCapacity,
        SbsRegister::RunTimeToEmpty,
        SbsRegister::AverageTimeToEmpty,
        SbsRegister::AverageTimeToFull,
        SbsRegister::ChargingCurrent,
        SbsRegister::ChargingVoltage,
        SbsRegister::BatteryStatus,
        SbsRegister::CycleCount,
        SbsRegister::ManufacturerData,
    ];

    /// SMBus address of the battery holding this register.
    pub const fn address(self) -> u8 {
        SBS_BATTERY_ADDRESS
    }

    /// SBS command code.
    pub const fn index(self) -> u8 {
        use SbsRegister::*;

        match self {
            ManufacturerAccess => SBS_MANUFACTURER_ACCESS,
            RemainingCapacityAlarm => SBS_REMAINING_CAPACITY_ALARM,
            RemainingTimeAlarm => SBS_REMAINING_TIME_ALARM,
            BatteryMode => SBS_BATTERY_MODE,
            AtRate => SBS_AT_RATE,
            AtRateTimeToFull => SBS_AT_RATE_TIME_TO_FULL,
            AtRateTimeToEmpty => SBS_AT_RATE_TIME_TO_EMPTY,
            AtRateOk => SBS_AT_RATE_OK,
            Temperature => SBS_TEMPERATURE,
            Voltage => SBS_VOLTAGE,
            Current => SBS_CURRENT,
            AverageCurrent => SBS_AVERAGE_CURRENT,
            MaxError => SBS_MAX_ERROR,
            RelativeStateOfCharge => SBS_RELATIVE_STATE_OF_CHARGE,
            AbsoluteStateOfCharge => SBS_ABSOLUTE_STATE_OF_CHARGE,
            RemainingCapacity => SBS_REMAINING_CAPACITY,
            FullChargeCapacity => SBS_FULL_CHARGE_CAPACITY,
            RunTimeToEmpty => SBS_RUN_TIME_TO_EMPTY,
            AverageTimeToEmpty => SBS_AVERAGE_TIME_TO_EMPTY,
            AverageTimeToFull => SBS_AVERAGE_TIME_TO_FULL,
            ChargingCurrent => SBS_CHARGING_CURRENT,
            ChargingVoltage => SBS_CHARGING_VOLTAGE,
            BatteryStatus => SBS_BATTERY_STATUS,
            CycleCount => SBS_CYCLE_COUNT,
            ManufactureDate => SBS_MANUFACTURE_DATE,
            SerialNumber => SBS_SERIAL_NUMBER,
            ManufacturerName => SBS_MANUFACTURER_NAME,
            DeviceName => SBS_DEVICE_NAME,
            DeviceChemistry => SBS_DEVICE_CHEMISTRY,
            ManufacturerData => SBS_MANUFACTURER_DATA,
        }
    }

    /// Label printed in front of the value.
    pub fn label(self) -> &'static str {
        use SbsRegister::*;

        match self {
            ManufacturerAccess => "Manufacturer Access",
            RemainingCapacityAlarm => "Remaining Capacity Alarm",
            RemainingTimeAlarm => "Remaining Time Alarm",
            BatteryMode => "Battery Mode",
            AtRate => "At Rate",
            AtRateTimeToFull => "At Rate Time To Full",
            AtRateTimeToEmpty => "At Rate Time To Empty",
            AtRateOk => "At Rate OK",
            Temperature => "Temperature",
            Voltage => "Voltage",
            Current => "Current",
            AverageCurrent => "Average Current",
            MaxError => "Max Error",
            RelativeStateOfCharge => "Relative State Of Charge",
            AbsoluteStateOfCharge => "Absolute State Of Charge",
            RemainingCapacity => "Remaining Capacity",
            FullChargeCapacity => "Full Charge Capacity",
            RunTimeToEmpty => "Run Time To Empty",
            AverageTimeToEmpty => "Average Time To Empty",
            AverageTimeToFull => "Average Time To Full",
            ChargingCurrent => "Charging Current",
            ChargingVoltage => "Charging Voltage",
            BatteryStatus => "Battery Status",
            CycleCount => "Cycle Count",
            ManufactureDate => "Manufacture Date",
            SerialNumber => "Serial Number",
            ManufacturerName => "Manufacturer Name",
            DeviceName => "Device Name",
            DeviceChemistry => "Device Chemistry",
            ManufacturerData => "Manufacturer Data",
        }
    }

    pub fn encoding(self) -> Encoding {
        use SbsRegister::*;

        match self {
            ManufacturerAccess | BatteryMode | BatteryStatus => Encoding::Bitfield,
            RemainingCapacityAlarm | AtRate | RemainingCapacity | FullChargeCapacity => {
                Encoding::Unsigned(Unit::Capacity)
            }
            RemainingTimeAlarm | AtRateTimeToFull | AtRateTimeToEmpty | RunTimeToEmpty
            | AverageTimeToEmpty | AverageTimeToFull => Encoding::Unsigned(Unit::Minutes),
            AtRateOk | CycleCount | SerialNumber => Encoding::Unsigned(Unit::None),
            Temperature => Encoding::DeciKelvin,
            Voltage | ChargingVoltage => Encoding::Unsigned(Unit::MilliVolts),
            Current | AverageCurrent => Encoding::Signed(Unit::MilliAmps),
            ChargingCurrent => Encoding::Unsigned(Unit::MilliAmps),
            MaxError | RelativeStateOfCharge | AbsoluteStateOfCharge => {
                Encoding::Unsigned(Unit::Percent)
            }
            ManufactureDate => Encoding::DateCode,
            ManufacturerName | DeviceName | DeviceChemistry => Encoding::Text,
            ManufacturerData => Encoding::VendorData,
        }
    }

    pub fn kind(self) -> RegisterKind {
        match self.encoding() {
            Encoding::Text | Encoding::VendorData => RegisterKind::Block,
            _ => RegisterKind::Word,
        }
    }
}

impl TryFrom<u8> for SbsRegister {
    type Error = SbsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SbsRegister::ALL
            .iter()
            .copied()
            .find(|reg| reg.index() == value)
            .ok_or(SbsError::UnknownRegister(value))
    }
}

impl std::fmt::Display for SbsRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:02X})", self.label(), self.index())
    }
}
