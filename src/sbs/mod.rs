//! The sbs module contains the Smart Battery register map and the
//! interpretation of raw register contents: unit conversions, bitfields and
//! the manufacturer data classifier.

pub mod convert;
pub mod flags;
pub mod register;
pub mod vendor;

pub use convert::{as_signed, deci_kelvin_to_celsius, DateCode};
pub use flags::{BatteryMode, BatteryStatus, StatusErrorCode};
pub use register::{Encoding, RegisterKind, SbsRegister, Unit};
pub use vendor::{CellVoltageBlock, VendorExtensionRecord};
