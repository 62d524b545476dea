//! # Utility Modules
//!
//! Common helpers used throughout the sbs-rs crate.

pub mod hex;

pub use hex::{decode_hex, format_hex_compact, HexError};
