//! Tests for raw value conversions and the manufacturer data classifier.

use proptest::prelude::*;
use sbs_rs::sbs::{as_signed, deci_kelvin_to_celsius, CellVoltageBlock, DateCode, VendorExtensionRecord};

#[test]
fn test_date_code_hand_computed() {
    // (raw, year, month, day)
    let cases = [
        (0x2A45u16, 2001u16, 2u8, 5u8),
        (0x0000, 1980, 0, 0),
        (0xFFFF, 1980 + 127, 15, 31),
        (0x486E, 2016, 3, 14),
    ];

    for (raw, year, month, day) in cases {
        let date = DateCode::from_raw(raw);
        assert_eq!((date.year, date.month, date.day), (year, month, day), "raw 0x{raw:04X}");
    }
}

#[test]
fn test_date_code_display_pads_month_and_day() {
    assert_eq!(DateCode::from_raw(0x486E).to_string(), "2016.03.14");
    assert_eq!(DateCode::from_raw(0xFFFF).to_string(), "2107.15.31");
}

#[test]
fn test_temperature_reference_point() {
    assert_eq!(format!("{:.2}", deci_kelvin_to_celsius(3000)), "26.85");
}

#[test]
fn test_signed_current_reference_points() {
    assert_eq!(as_signed(0xFFFF), -1);
    assert_eq!(as_signed(0x8000), -32768);
    assert_eq!(as_signed(0x0001), 1);
}

#[test]
fn test_classifier_threshold() {
    let data: Vec<u8> = (0..14).collect();

    match VendorExtensionRecord::classify(&data[..13]) {
        VendorExtensionRecord::Raw(bytes) => assert_eq!(bytes, &data[..13]),
        other => panic!("13 bytes must be raw, got {other:?}"),
    }

    match VendorExtensionRecord::classify(&data) {
        VendorExtensionRecord::Structured(block) => {
            // stored index 3 is bytes 10..12
            assert_eq!(block.cell_voltage_mv(0), Some(u16::from_le_bytes([10, 11])));
            assert_eq!(block.cell_voltage_mv(3), Some(u16::from_le_bytes([4, 5])));
        }
        other => panic!("14 bytes must be structured, got {other:?}"),
    }

    assert_eq!(
        VendorExtensionRecord::classify(&[]),
        VendorExtensionRecord::Raw(Vec::new())
    );
}

proptest! {
    #[test]
    fn prop_date_code_reassembles(raw in any::<u16>()) {
        let date = DateCode::from_raw(raw);
        let packed = ((date.year - 1980) << 9) | (u16::from(date.month) << 5) | u16::from(date.day);
        prop_assert_eq!(packed, raw);
        prop_assert!(date.month <= 15);
        prop_assert!(date.day <= 31);
    }

    #[test]
    fn prop_classifier_depends_only_on_length(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let record = VendorExtensionRecord::classify(&data);
        prop_assert_eq!(record.is_structured(), data.len() >= 14);
        if let VendorExtensionRecord::Raw(bytes) = record {
            prop_assert_eq!(bytes, data);
        }
    }

    #[test]
    fn prop_cells_are_stored_in_reverse(voltages in proptest::array::uniform4(any::<u16>())) {
        let mut data = vec![0u8; 4];
        for v in voltages {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.extend_from_slice(&[0, 0]);

        let block = CellVoltageBlock::decode(&data).unwrap();
        for cell in 0..4 {
            prop_assert_eq!(block.cell_voltage_mv(cell), Some(voltages[3 - cell]));
        }
    }
}
