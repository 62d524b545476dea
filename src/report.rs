//! # SBS Report
//!
//! Reads every register of the map in a fixed order and turns each raw value
//! into a labeled field. A register that fails to read never aborts the run:
//! its field carries a placeholder instead and the report continues.

use crate::config::ReportOptions;
use crate::constants::{SBS_BLOCK_BUFFER_SIZE, SBS_BLOCK_MAX_LEN, SBS_ERROR_PLACEHOLDER};
use crate::sbs::flags::{describe_battery_mode, describe_battery_status};
use crate::sbs::{
    as_signed, deci_kelvin_to_celsius, DateCode, Encoding, SbsRegister, Unit,
    VendorExtensionRecord,
};
use crate::smbus::SmbusAdapter;
use crate::util::hex::format_hex_compact;
use log::{debug, warn};
use std::fmt;
use std::io::{self, Write};

/// Width labels are padded to.
pub const LABEL_WIDTH: usize = 26;

/// Decoded value of one register.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Unsigned { value: u16, unit: Unit },
    Signed { value: i16, unit: Unit },
    Bitfield { raw: u16, annotation: Option<String> },
    /// Degrees Celsius.
    Temperature(f64),
    Date(DateCode),
    Vendor(VendorExtensionRecord),
    /// The register could not be read.
    Unavailable,
}

/// One labeled entry of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportField {
    pub register: SbsRegister,
    pub value: FieldValue,
}

fn with_unit(value: impl fmt::Display, unit: Unit) -> String {
    match unit.suffix() {
        Some(suffix) => format!("{value} {suffix}"),
        None => value.to_string(),
    }
}

fn line(label: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{label:<width$}:", width = LABEL_WIDTH)
    } else {
        format!("{label:<width$}: {value}", width = LABEL_WIDTH)
    }
}

impl ReportField {
    /// Rendered text lines; one, except for structured manufacturer data.
    pub fn lines(&self) -> Vec<String> {
        let label = self.register.label();

        let value = match &self.value {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Unsigned { value, unit } => with_unit(value, *unit),
            FieldValue::Signed { value, unit } => with_unit(value, *unit),
            FieldValue::Bitfield { raw, annotation } => match annotation {
                Some(annotation) => format!("{raw:04x} {annotation}"),
                None => format!("{raw:04x}"),
            },
            FieldValue::Temperature(celsius) => {
                with_unit(format!("{celsius:.2}"), Unit::DegreesCelsius)
            }
            FieldValue::Date(date) => date.to_string(),
            FieldValue::Vendor(VendorExtensionRecord::Raw(bytes)) => format_hex_compact(bytes),
            FieldValue::Vendor(VendorExtensionRecord::Structured(block)) => {
                return block
                    .cells()
                    .map(|(cell, mv)| {
                        line(
                            &format!("Cell {cell} voltage"),
                            &with_unit(mv, Unit::MilliVolts),
                        )
                    })
                    .collect();
            }
            FieldValue::Unavailable => SBS_ERROR_PLACEHOLDER.to_string(),
        };

        vec![line(label, &value)]
    }

    pub fn is_available(&self) -> bool {
        self.value != FieldValue::Unavailable
    }
}

/// The decoded fields of one run, in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    fields: Vec<ReportField>,
}

impl Report {
    pub fn fields(&self) -> &[ReportField] {
        &self.fields
    }

    pub fn field(&self, register: SbsRegister) -> Option<&ReportField> {
        self.fields.iter().find(|f| f.register == register)
    }

    /// All output lines, including the blank line after the static block.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for field in &self.fields {
            lines.extend(field.lines());
            if field.register == SbsRegister::ManufactureDate {
                lines.push(String::new());
            }
        }
        lines
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Turns adapter reads into a [`Report`].
pub struct ReportDecoder {
    options: ReportOptions,
    scratch: [u8; SBS_BLOCK_BUFFER_SIZE],
}

impl ReportDecoder {
    pub fn new(options: ReportOptions) -> Self {
        ReportDecoder {
            options,
            scratch: [0; SBS_BLOCK_BUFFER_SIZE],
        }
    }

    /// Reads and decodes every register once, in [`SbsRegister::REPORT_ORDER`].
    pub async fn decode<A: SmbusAdapter + ?Sized>(&mut self, adapter: &mut A) -> Report {
        let mut fields = Vec::with_capacity(SbsRegister::REPORT_ORDER.len());
        for register in SbsRegister::REPORT_ORDER {
            let value = self.decode_register(adapter, register).await;
            fields.push(ReportField { register, value });
        }
        Report { fields }
    }

    async fn decode_register<A: SmbusAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        register: SbsRegister,
    ) -> FieldValue {
        match register.encoding() {
            Encoding::Text => match self.read_block(adapter, register).await {
                Some(bytes) if !bytes.is_empty() => FieldValue::Text(block_to_string(&bytes)),
                _ => FieldValue::Unavailable,
            },
            Encoding::VendorData => {
                let bytes = self.read_block(adapter, register).await.unwrap_or_default();
                FieldValue::Vendor(VendorExtensionRecord::classify(&bytes))
            }
            encoding => match read_word(adapter, register).await {
                Some(raw) => self.interpret_word(register, encoding, raw),
                None => FieldValue::Unavailable,
            },
        }
    }

    fn interpret_word(&self, register: SbsRegister, encoding: Encoding, raw: u16) -> FieldValue {
        match encoding {
            Encoding::Unsigned(unit) => FieldValue::Unsigned { value: raw, unit },
            Encoding::Signed(unit) => FieldValue::Signed {
                value: as_signed(raw),
                unit,
            },
            Encoding::Bitfield => {
                let annotation = match register {
                    _ if !self.options.decode_flags => None,
                    SbsRegister::BatteryMode => Some(describe_battery_mode(raw)),
                    SbsRegister::BatteryStatus => Some(describe_battery_status(raw)),
                    _ => None,
                };
                FieldValue::Bitfield { raw, annotation }
            }
            Encoding::DeciKelvin => FieldValue::Temperature(deci_kelvin_to_celsius(raw)),
            Encoding::DateCode => {
                let date = DateCode::from_raw(raw);
                if date.to_date().is_none() {
                    debug!("Manufacture date {date} is not a calendar date");
                }
                FieldValue::Date(date)
            }
            // Block encodings never reach here.
            Encoding::Text | Encoding::VendorData => FieldValue::Unavailable,
        }
    }

    /// Block read into the zeroed scratch buffer; `None` on failure.
    async fn read_block<A: SmbusAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        register: SbsRegister,
    ) -> Option<Vec<u8>> {
        self.scratch.fill(0);

        match adapter
            .read_block(register.address(), register.index(), &mut self.scratch)
            .await
        {
            Ok(len) => {
                let len = len.min(SBS_BLOCK_MAX_LEN);
                let bytes = self.scratch[..len].to_vec();
                debug!("{register}: block [{}]", format_hex_compact(&bytes));
                Some(bytes)
            }
            Err(e) => {
                warn!("{register}: {e}");
                None
            }
        }
    }
}

async fn read_word<A: SmbusAdapter + ?Sized>(adapter: &mut A, register: SbsRegister) -> Option<u16> {
    match adapter.read_word(register.address(), register.index()).await {
        Ok(raw) => {
            debug!("{register}: word 0x{raw:04x}");
            Some(raw)
        }
        Err(e) => {
            warn!("{register}: {e}");
            None
        }
    }
}

/// String contents of a block: up to the first NUL, invalid UTF-8 replaced.
///
/// Control characters become `.` so a field always stays on one line.
fn block_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
        .chars()
        .map(|c| if c.is_control() { '.' } else { c })
        .collect()
}

/// Runs one report session: configures PEC once, then decodes every register.
///
/// A failure to configure PEC is logged and the report proceeds.
pub async fn generate_report<A: SmbusAdapter + ?Sized>(
    adapter: &mut A,
    packet_error_checking: bool,
    options: ReportOptions,
) -> Report {
    if packet_error_checking {
        if let Err(e) = adapter.enable_packet_error_checking(true).await {
            warn!("Could not enable PEC: {e}");
        }
    }

    ReportDecoder::new(options).decode(adapter).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_to_string_stops_at_nul() {
        assert_eq!(block_to_string(b"LGC\0junk"), "LGC");
        assert_eq!(block_to_string(b"bq20z45"), "bq20z45");
        assert_eq!(block_to_string(&[0x4c, 0xff, 0x43]), "L\u{fffd}C");
        assert_eq!(block_to_string(b"AB\r\nCD\t\x7f"), "AB..CD..");
    }

    #[test]
    fn test_line_padding() {
        assert_eq!(line("Voltage", "12000 mV"), "Voltage                   : 12000 mV");
        assert_eq!(line("Manufacturer Data", ""), "Manufacturer Data         :");
        assert_eq!(line("Device Name", "bq20z45  "), "Device Name               : bq20z45  ");
    }

    #[test]
    fn test_field_rendering() {
        let field = ReportField {
            register: SbsRegister::Current,
            value: FieldValue::Signed {
                value: -1,
                unit: Unit::MilliAmps,
            },
        };
        assert_eq!(field.lines(), vec!["Current                   : -1 mA"]);

        let field = ReportField {
            register: SbsRegister::CycleCount,
            value: FieldValue::Unsigned {
                value: 42,
                unit: Unit::None,
            },
        };
        assert_eq!(field.lines(), vec!["Cycle Count               : 42"]);

        let field = ReportField {
            register: SbsRegister::BatteryMode,
            value: FieldValue::Bitfield {
                raw: 0x6001,
                annotation: None,
            },
        };
        assert_eq!(field.lines(), vec!["Battery Mode              : 6001"]);
    }

    #[test]
    fn test_unavailable_renders_placeholder() {
        let field = ReportField {
            register: SbsRegister::Temperature,
            value: FieldValue::Unavailable,
        };
        assert!(!field.is_available());
        assert_eq!(field.lines(), vec!["Temperature               : ERROR"]);
    }
}
