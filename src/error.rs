//! # SBS Error Handling
//!
//! This module defines the SbsError enum, which represents the different error
//! types that can occur in the sbs-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur in the SBS crate.
#[derive(Debug, Error)]
pub enum SbsError {
    /// The adapter session could not be established.
    #[error("Failed to open device {device}: {reason}")]
    TransportOpen { device: String, reason: String },

    /// A word or block read failed on the bus.
    #[error("Failed to read register 0x{register:02X}: {reason}")]
    RegisterRead { register: u8, reason: String },

    /// Indicates a device URI that could not be parsed.
    #[error("Invalid device URI: {0}")]
    InvalidDeviceUri(String),

    /// Indicates a register index outside the SBS register map.
    #[error("Unknown register: 0x{0:02X}")]
    UnknownRegister(u8),

    /// Indicates a malformed register dump file.
    #[error("Invalid register dump: {0}")]
    DumpFormat(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SbsError {
    fn from(e: serde_json::Error) -> Self {
        SbsError::DumpFormat(e.to_string())
    }
}

impl SbsError {
    /// Builds a `RegisterRead` error from any displayable cause.
    pub fn register_read(register: u8, reason: impl std::fmt::Display) -> Self {
        SbsError::RegisterRead {
            register,
            reason: reason.to_string(),
        }
    }
}
