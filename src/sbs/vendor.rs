//! # Manufacturer Data (0x23) Classification
//!
//! ManufacturerData is a vendor defined block. Its layout cannot be told from
//! the register index, so the returned length decides how it is read:
//!
//! ```text
//! len < 14   raw bytes, shown as a hex dump
//! len >= 14  structured layout:
//!
//!   offset  size  field
//!   0       4     reserved
//!   4       2     cell voltage [0] (mV, LE)
//!   6       2     cell voltage [1]
//!   8       2     cell voltage [2]
//!   10      2     cell voltage [3]
//!   12      2     reserved
//! ```
//!
//! Cell voltages are stored highest cell first, so logical cell `i` lives in
//! stored slot `3 - i`. Bytes past offset 14 are ignored.

use crate::constants::{
    SBS_VENDOR_CELL_COUNT, SBS_VENDOR_CELL_VOLTAGE_OFFSET, SBS_VENDOR_STRUCTURED_LEN,
};
use log::debug;

/// Decoded view of the ManufacturerData block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorExtensionRecord {
    /// Block shorter than the structured layout; bytes in bus order.
    Raw(Vec<u8>),
    /// Block long enough to hold the cell-voltage layout.
    Structured(CellVoltageBlock),
}

/// The 14-byte cell-voltage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVoltageBlock {
    pub reserved_head: [u8; 4],
    /// Cell voltages in stored order (highest cell first).
    pub stored_cell_voltage_mv: [u16; SBS_VENDOR_CELL_COUNT],
    pub reserved_tail: [u8; 2],
}

impl CellVoltageBlock {
    /// Decodes the layout from the start of `data`.
    ///
    /// Returns `None` when fewer than 14 bytes are available.
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < SBS_VENDOR_STRUCTURED_LEN {
            return None;
        }

        let mut stored_cell_voltage_mv = [0u16; SBS_VENDOR_CELL_COUNT];
        for (slot, voltage) in stored_cell_voltage_mv.iter_mut().enumerate() {
            let offset = SBS_VENDOR_CELL_VOLTAGE_OFFSET + slot * 2;
            *voltage = u16::from_le_bytes([data[offset], data[offset + 1]]);
        }

        Some(CellVoltageBlock {
            reserved_head: [data[0], data[1], data[2], data[3]],
            stored_cell_voltage_mv,
            reserved_tail: [data[12], data[13]],
        })
    }

    /// Voltage of logical cell `cell` (0 = first cell shown), if it exists.
    pub fn cell_voltage_mv(&self, cell: usize) -> Option<u16> {
        if cell >= SBS_VENDOR_CELL_COUNT {
            return None;
        }
        Some(self.stored_cell_voltage_mv[SBS_VENDOR_CELL_COUNT - 1 - cell])
    }

    /// `(logical cell, millivolts)` pairs in display order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        (0..SBS_VENDOR_CELL_COUNT)
            .map(move |cell| (cell, self.stored_cell_voltage_mv[SBS_VENDOR_CELL_COUNT - 1 - cell]))
    }
}

impl VendorExtensionRecord {
    /// Picks the representation from the block length alone.
    pub fn classify(data: &[u8]) -> Self {
        match CellVoltageBlock::decode(data) {
            Some(block) => {
                debug!("ManufacturerData: {} bytes, cell voltage layout", data.len());
                VendorExtensionRecord::Structured(block)
            }
            None => {
                debug!("ManufacturerData: {} bytes, raw", data.len());
                VendorExtensionRecord::Raw(data.to_vec())
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, VendorExtensionRecord::Structured(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured_block() -> Vec<u8> {
        vec![
            0xAA, 0xBB, 0xCC, 0xDD, // reserved
            0x10, 0x0E, // 3600
            0x1A, 0x0E, // 3610
            0x24, 0x0E, // 3620
            0x2E, 0x0E, // 3630
            0xEE, 0xFF, // reserved
        ]
    }

    #[test]
    fn test_thirteen_bytes_is_raw() {
        let data = &structured_block()[..13];
        assert_eq!(
            VendorExtensionRecord::classify(data),
            VendorExtensionRecord::Raw(data.to_vec())
        );
    }

    #[test]
    fn test_empty_block_is_raw() {
        assert_eq!(
            VendorExtensionRecord::classify(&[]),
            VendorExtensionRecord::Raw(Vec::new())
        );
    }

    #[test]
    fn test_fourteen_bytes_is_structured() {
        let record = VendorExtensionRecord::classify(&structured_block());
        let VendorExtensionRecord::Structured(block) = record else {
            panic!("expected structured record, got {record:?}");
        };

        assert_eq!(block.reserved_head, [0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(block.stored_cell_voltage_mv, [3600, 3610, 3620, 3630]);
        assert_eq!(block.reserved_tail, [0xEE, 0xFF]);
    }

    #[test]
    fn test_logical_cells_are_reversed() {
        let block = CellVoltageBlock::decode(&structured_block()).unwrap();
        let cells: Vec<(usize, u16)> = block.cells().collect();
        assert_eq!(cells, vec![(0, 3630), (1, 3620), (2, 3610), (3, 3600)]);
        assert_eq!(block.cell_voltage_mv(0), Some(3630));
        assert_eq!(block.cell_voltage_mv(4), None);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut data = structured_block();
        data.extend_from_slice(&[0x01; 18]);
        let short = CellVoltageBlock::decode(&structured_block()).unwrap();
        assert_eq!(CellVoltageBlock::decode(&data), Some(short));
    }
}
