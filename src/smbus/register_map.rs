//! In-memory register map adapter
//!
//! Serves word and block reads from a static table. Used by the tests and by
//! the `dump://` scheme, which loads the table from a JSON file:
//!
//! ```json
//! {
//!   "version": "1.2.3",
//!   "words": { "0x08": 2982, "0x0a": 65436 },
//!   "blocks": { "0x20": "SANYO", "0x21": "hex:34 32 54", "0x23": [0, 0, 0, 0, 16, 14] }
//! }
//! ```
//!
//! Register keys may be hex (`0x..`) or decimal. Block values are a string
//! (its UTF-8 bytes), a `hex:` prefixed hex string, or an array of bytes. A register missing from the
//! table fails to read, just like an absent register on a real battery.

use crate::constants::{SBS_BATTERY_ADDRESS, SBS_BLOCK_BUFFER_SIZE, SBS_BLOCK_MAX_LEN};
use crate::error::SbsError;
use crate::smbus::{AdapterVersion, SmbusAdapter};
use crate::util::hex::decode_hex;
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockValue {
    Text(String),
    Bytes(Vec<u8>),
}

#[derive(Debug, Deserialize)]
struct RegisterDump {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    words: BTreeMap<String, u16>,
    #[serde(default)]
    blocks: BTreeMap<String, BlockValue>,
}

fn parse_register_key(key: &str) -> Result<u8, SbsError> {
    let parsed = match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => key.parse::<u8>(),
    };
    parsed.map_err(|_| SbsError::DumpFormat(format!("bad register key '{key}'")))
}

fn parse_version(text: &str) -> Result<AdapterVersion, SbsError> {
    let parts: Vec<u8> = text
        .split('.')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| SbsError::DumpFormat(format!("bad version '{text}'")))?;

    match parts.as_slice() {
        [major, minor, patch] => Ok(AdapterVersion {
            major: *major,
            minor: *minor,
            patch: *patch,
        }),
        _ => Err(SbsError::DumpFormat(format!("bad version '{text}'"))),
    }
}

/// Adapter answering reads from an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct RegisterMapAdapter {
    words: HashMap<(u8, u8), u16>,
    blocks: HashMap<(u8, u8), Vec<u8>>,
    version: Option<AdapterVersion>,
    pec_enabled: bool,
    pec_requests: usize,
    reads: Vec<u8>,
}

impl RegisterMapAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word register on the battery address.
    pub fn with_word(mut self, command: u8, value: u16) -> Self {
        self.words.insert((SBS_BATTERY_ADDRESS, command), value);
        self
    }

    /// Adds a block register on the battery address.
    ///
    /// Payloads longer than an SMBus block are truncated to 255 bytes.
    pub fn with_block(mut self, command: u8, data: impl AsRef<[u8]>) -> Self {
        let data = data.as_ref();
        let len = data.len().min(SBS_BLOCK_MAX_LEN);
        self.blocks
            .insert((SBS_BATTERY_ADDRESS, command), data[..len].to_vec());
        self
    }

    pub fn with_version(mut self, version: AdapterVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Removes a register so that reading it fails.
    pub fn without(mut self, command: u8) -> Self {
        self.words.remove(&(SBS_BATTERY_ADDRESS, command));
        self.blocks.remove(&(SBS_BATTERY_ADDRESS, command));
        self
    }

    /// Builds the table from a JSON register dump.
    pub fn from_json(json: &str) -> Result<Self, SbsError> {
        let dump: RegisterDump = serde_json::from_str(json)?;
        let mut adapter = RegisterMapAdapter::new();

        if let Some(version) = dump.version.as_deref() {
            adapter.version = Some(parse_version(version)?);
        }
        for (key, value) in &dump.words {
            adapter = adapter.with_word(parse_register_key(key)?, *value);
        }
        for (key, value) in &dump.blocks {
            let command = parse_register_key(key)?;
            adapter = match value {
                BlockValue::Text(text) => match text.strip_prefix("hex:") {
                    Some(hex) => {
                        let bytes = decode_hex(hex).map_err(|e| {
                            SbsError::DumpFormat(format!("register {key}: {e}"))
                        })?;
                        adapter.with_block(command, bytes)
                    }
                    None => adapter.with_block(command, text.as_bytes()),
                },
                BlockValue::Bytes(bytes) => adapter.with_block(command, bytes),
            };
        }

        debug!(
            "Register dump: {} words, {} blocks",
            adapter.words.len(),
            adapter.blocks.len()
        );
        Ok(adapter)
    }

    /// Loads a JSON register dump from disk.
    pub async fn from_dump_file(path: &Path) -> Result<Self, SbsError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// Whether PEC is currently enabled.
    pub fn pec_enabled(&self) -> bool {
        self.pec_enabled
    }

    /// How many times PEC was configured.
    pub fn pec_requests(&self) -> usize {
        self.pec_requests
    }

    /// Commands read so far, in order.
    pub fn read_log(&self) -> &[u8] {
        &self.reads
    }
}

#[async_trait::async_trait]
impl SmbusAdapter for RegisterMapAdapter {
    async fn enable_packet_error_checking(&mut self, enable: bool) -> Result<(), SbsError> {
        self.pec_enabled = enable;
        self.pec_requests += 1;
        Ok(())
    }

    async fn read_word(&mut self, address: u8, command: u8) -> Result<u16, SbsError> {
        self.reads.push(command);
        self.words
            .get(&(address, command))
            .copied()
            .ok_or_else(|| SbsError::register_read(command, "no such word register"))
    }

    async fn read_block(
        &mut self,
        address: u8,
        command: u8,
        buf: &mut [u8; SBS_BLOCK_BUFFER_SIZE],
    ) -> Result<usize, SbsError> {
        self.reads.push(command);
        let data = self
            .blocks
            .get(&(address, command))
            .ok_or_else(|| SbsError::register_read(command, "no such block register"))?;

        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn version(&self) -> Option<AdapterVersion> {
        self.version
    }
}
