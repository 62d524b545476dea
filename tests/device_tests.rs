//! Device URI handling and register dump replay.

use sbs_rs::{connect, run_report, DeviceUri, ReportConfig, ReportOptions, SbsError};
use std::io::Write;
use std::path::PathBuf;

const DUMP: &str = r#"{
    "version": "1.2.0",
    "words": {
        "0x1c": 777,
        "0x1b": 18542,
        "0x08": 3000,
        "0x0a": 65535,
        "0x17": 5
    },
    "blocks": {
        "0x20": "LGC",
        "0x22": "LION",
        "0x23": [0, 0, 0, 0, 16, 14, 26, 14, 36, 14, 46, 14, 0, 0]
    }
}"#;

fn write_dump(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_parse_all_schemes() {
    assert_eq!(
        "fx2lp://vid=0x04b4,pid=0x8613".parse::<DeviceUri>().unwrap(),
        DeviceUri::Fx2lp { vid: 0x04b4, pid: 0x8613 }
    );
    assert_eq!(
        "i2cdev:///dev/i2c-7".parse::<DeviceUri>().unwrap(),
        DeviceUri::I2cDev { path: PathBuf::from("/dev/i2c-7") }
    );
    assert_eq!(
        "dump:///tmp/battery.json".parse::<DeviceUri>().unwrap(),
        DeviceUri::Dump { path: PathBuf::from("/tmp/battery.json") }
    );
}

#[test]
fn test_uri_display_roundtrip() {
    for text in [
        "fx2lp://vid=0x04b4,pid=0x8613",
        "i2cdev:///dev/i2c-1",
        "dump:///tmp/x.json",
    ] {
        let uri: DeviceUri = text.parse().unwrap();
        assert_eq!(uri.to_string(), text);
    }
}

#[tokio::test]
async fn test_connect_rejects_bad_uri() {
    assert!(matches!(
        connect("serial:///dev/ttyUSB0").await,
        Err(SbsError::InvalidDeviceUri(_))
    ));
}

#[tokio::test]
async fn test_default_device_fails_to_open() {
    let result = run_report(&ReportConfig::default()).await;
    assert!(matches!(result, Err(SbsError::TransportOpen { .. })));
}

#[tokio::test]
async fn test_dump_replay_report() {
    let file = write_dump(DUMP);
    let config = ReportConfig {
        device: DeviceUri::Dump {
            path: file.path().to_path_buf(),
        },
        ..ReportConfig::default()
    };

    let (version, report) = run_report(&config).await.unwrap();
    assert_eq!(version.unwrap().to_string(), "1.2.0");

    let lines = report.lines();
    assert_eq!(lines[0], "Manufacturer Name         : LGC");
    assert_eq!(lines[1], "Device Name               : ERROR");
    assert_eq!(lines[2], "Device Chemistry          : LION");
    assert_eq!(lines[3], "Serial Number             : 777");
    assert_eq!(lines[4], "Manufacture Date          : 2016.03.14");
    assert!(lines.contains(&"Temperature               : 26.85 degC".to_string()));
    assert!(lines.contains(&"Current                   : -1 mA".to_string()));
    assert!(lines.contains(&"Voltage                   : ERROR".to_string()));
    assert_eq!(lines.last().unwrap(), "Cell 3 voltage            : 3600 mV");
}

#[tokio::test]
async fn test_dump_replay_with_flags() {
    let file = write_dump(r#"{ "words": { "0x16": 32 } }"#);
    let config = ReportConfig {
        device: DeviceUri::Dump {
            path: file.path().to_path_buf(),
        },
        packet_error_checking: false,
        options: ReportOptions { decode_flags: true },
    };

    let (version, report) = run_report(&config).await.unwrap();
    assert!(version.is_none());
    assert!(report
        .lines()
        .contains(&"Battery Status            : 0020 [FULLY_CHARGED, error: OK]".to_string()));
}

#[tokio::test]
async fn test_malformed_dump_fails_to_open() {
    let file = write_dump(r#"{ "words": { "0x08": "warm" } }"#);
    let uri = DeviceUri::Dump {
        path: file.path().to_path_buf(),
    };

    match sbs_rs::open_adapter(&uri).await {
        Err(SbsError::TransportOpen { reason, .. }) => {
            assert!(reason.starts_with("Invalid register dump"), "{reason}")
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("malformed dump must not open"),
    }
}
