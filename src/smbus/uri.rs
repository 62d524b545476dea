//! Device URIs of the form `<scheme>://<device definition>`.
//!
//! ```text
//! fx2lp://vid=0x04b4,pid=0x8613
//! i2cdev:///dev/i2c-7
//! i2c:///dev/i2c-7
//! dump:///var/tmp/battery.json
//! ```

use crate::constants::{DEFAULT_FX2LP_PID, DEFAULT_FX2LP_VID};
use crate::error::SbsError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Adapter selected for SMBus access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceUri {
    /// Cypress FX2LP based USB adapter.
    Fx2lp { vid: u16, pid: u16 },
    /// Linux i2c-dev character device.
    I2cDev { path: PathBuf },
    /// JSON register dump replayed from disk.
    Dump { path: PathBuf },
}

impl Default for DeviceUri {
    fn default() -> Self {
        DeviceUri::Fx2lp {
            vid: DEFAULT_FX2LP_VID,
            pid: DEFAULT_FX2LP_PID,
        }
    }
}

fn parse_id(key: &str, value: &str) -> Result<u16, SbsError> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse::<u16>(),
    };
    parsed.map_err(|_| SbsError::InvalidDeviceUri(format!("bad {key} value '{value}'")))
}

fn parse_fx2lp(params: &str) -> Result<DeviceUri, SbsError> {
    let mut vid = None;
    let mut pid = None;

    for param in params.split(',').filter(|p| !p.is_empty()) {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| SbsError::InvalidDeviceUri(format!("expected key=value, got '{param}'")))?;
        match key.trim() {
            "vid" => vid = Some(parse_id("vid", value.trim())?),
            "pid" => pid = Some(parse_id("pid", value.trim())?),
            other => {
                return Err(SbsError::InvalidDeviceUri(format!(
                    "unknown fx2lp parameter '{other}'"
                )))
            }
        }
    }

    match (vid, pid) {
        (Some(vid), Some(pid)) => Ok(DeviceUri::Fx2lp { vid, pid }),
        _ => Err(SbsError::InvalidDeviceUri(
            "fx2lp requires both vid and pid".into(),
        )),
    }
}

fn parse_path(scheme: &str, params: &str) -> Result<PathBuf, SbsError> {
    if params.is_empty() {
        return Err(SbsError::InvalidDeviceUri(format!("{scheme} requires a path")));
    }
    Ok(PathBuf::from(params))
}

impl FromStr for DeviceUri {
    type Err = SbsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, params) = s
            .split_once("://")
            .ok_or_else(|| SbsError::InvalidDeviceUri(format!("missing scheme in '{s}'")))?;

        match scheme.to_ascii_lowercase().as_str() {
            "fx2lp" => parse_fx2lp(params),
            "i2cdev" | "i2c" => Ok(DeviceUri::I2cDev {
                path: parse_path(scheme, params)?,
            }),
            "dump" => Ok(DeviceUri::Dump {
                path: parse_path(scheme, params)?,
            }),
            other => Err(SbsError::InvalidDeviceUri(format!("unknown scheme '{other}'"))),
        }
    }
}

impl fmt::Display for DeviceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceUri::Fx2lp { vid, pid } => write!(f, "fx2lp://vid=0x{vid:04x},pid=0x{pid:04x}"),
            DeviceUri::I2cDev { path } => write!(f, "i2cdev://{}", path.display()),
            DeviceUri::Dump { path } => write!(f, "dump://{}", path.display()),
        }
    }
}
