//! The smbus module contains the transport side of the crate: the adapter
//! trait the report decoder reads through, device URI parsing, and the
//! available adapter implementations.
//!
//! Adapters only move bytes. They do not retry, time out or interpret
//! register contents; that is left to the caller.

#[cfg(target_os = "linux")]
pub mod i2cdev;
pub mod register_map;
pub mod uri;

pub use register_map::RegisterMapAdapter;
pub use uri::DeviceUri;

use crate::constants::SBS_BLOCK_BUFFER_SIZE;
use crate::error::SbsError;
use std::fmt;

/// Firmware version reported by an adapter when the session is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl AdapterVersion {
    /// Unpacks `major | minor << 8 | patch << 16`.
    pub fn from_packed(packed: u32) -> Self {
        AdapterVersion {
            major: (packed & 0xFF) as u8,
            minor: ((packed >> 8) & 0xFF) as u8,
            patch: ((packed >> 16) & 0xFF) as u8,
        }
    }

    pub fn to_packed(self) -> u32 {
        u32::from(self.major) | u32::from(self.minor) << 8 | u32::from(self.patch) << 16
    }
}

impl fmt::Display for AdapterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Trait for SMBus adapter operations
///
/// `address` is the 8-bit SMBus address (0x16 for a smart battery) and
/// `command` the SBS register index.
#[async_trait::async_trait]
pub trait SmbusAdapter: Send {
    /// Enables or disables Packet Error Checking for the session.
    async fn enable_packet_error_checking(&mut self, enable: bool) -> Result<(), SbsError>;

    /// SMBus Read Word.
    async fn read_word(&mut self, address: u8, command: u8) -> Result<u16, SbsError>;

    /// SMBus Block Read into `buf`, returning the payload length.
    ///
    /// Only the first `len` bytes of `buf` are written.
    async fn read_block(
        &mut self,
        address: u8,
        command: u8,
        buf: &mut [u8; SBS_BLOCK_BUFFER_SIZE],
    ) -> Result<usize, SbsError>;

    /// Adapter firmware version, if the adapter has firmware of its own.
    fn version(&self) -> Option<AdapterVersion> {
        None
    }
}

/// Opens the adapter selected by `uri`.
///
/// Any failure is reported as [`SbsError::TransportOpen`].
pub async fn open_adapter(uri: &DeviceUri) -> Result<Box<dyn SmbusAdapter>, SbsError> {
    let open_error = |reason: String| SbsError::TransportOpen {
        device: uri.to_string(),
        reason,
    };

    match uri {
        DeviceUri::Fx2lp { .. } => Err(open_error(
            "FX2LP USB adapters are not supported by this build".into(),
        )),
        #[cfg(target_os = "linux")]
        DeviceUri::I2cDev { path } => {
            let adapter = i2cdev::I2cDevAdapter::open(path).map_err(|e| open_error(e.to_string()))?;
            Ok(Box::new(adapter))
        }
        #[cfg(not(target_os = "linux"))]
        DeviceUri::I2cDev { .. } => Err(open_error(
            "i2c-dev is only available on Linux".into(),
        )),
        DeviceUri::Dump { path } => {
            let adapter = RegisterMapAdapter::from_dump_file(path)
                .await
                .map_err(|e| open_error(e.to_string()))?;
            Ok(Box::new(adapter))
        }
    }
}
