//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used for the manufacturer data dump, for debug logging of
//! block payloads, and for hex block values in register dumps.
//!
//! ## Usage
//!
//! ```rust
//! use sbs_rs::util::hex::{decode_hex, format_hex_compact};
//!
//! let data = [0x4c, 0x47, 0x43];
//! assert_eq!(format_hex_compact(&data), "4c 47 43");
//! assert_eq!(decode_hex("4c 47 43").unwrap(), data);
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Format bytes for compact display, e.g. "0e 10 ff".
///
/// An empty slice yields an empty string.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
