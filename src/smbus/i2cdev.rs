//! # Linux i2c-dev Adapter
//!
//! SMBus access through `/dev/i2c-N` using the kernel's `I2C_SMBUS` ioctl.
//! The kernel limits SMBus block reads to 32 bytes.

use crate::constants::SBS_BLOCK_BUFFER_SIZE;
use crate::error::SbsError;
use crate::smbus::SmbusAdapter;
use log::{debug, warn};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

// <linux/i2c-dev.h>
const I2C_SLAVE: u32 = 0x0703;
const I2C_SLAVE_FORCE: u32 = 0x0706;
const I2C_PEC: u32 = 0x0708;
const I2C_SMBUS: u32 = 0x0720;

// <linux/i2c.h>
const I2C_SMBUS_READ: u8 = 1;
const I2C_SMBUS_WORD_DATA: u32 = 3;
const I2C_SMBUS_BLOCK_DATA: u32 = 5;
const I2C_SMBUS_BLOCK_MAX: usize = 32;

#[repr(C)]
union I2cSmbusData {
    word: u16,
    // length byte + payload + PEC
    block: [u8; I2C_SMBUS_BLOCK_MAX + 2],
}

#[repr(C)]
struct I2cSmbusIoctlData {
    read_write: u8,
    command: u8,
    size: u32,
    data: *mut I2cSmbusData,
}

fn is_busy(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EBUSY)
}

/// SMBus adapter backed by a Linux i2c-dev character device.
pub struct I2cDevAdapter {
    file: File,
    path: PathBuf,
    /// 7-bit address currently selected with I2C_SLAVE.
    selected: Option<u8>,
}

impl I2cDevAdapter {
    pub fn open(path: &Path) -> Result<Self, SbsError> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        debug!("Opened i2c-dev {}", path.display());
        Ok(I2cDevAdapter {
            file,
            path: path.to_path_buf(),
            selected: None,
        })
    }

    fn ioctl_arg(&self, request: u32, arg: libc::c_ulong) -> io::Result<()> {
        // SAFETY: the fd is owned by `self.file` and the request takes an
        // integer argument.
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), request as _, arg) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Selects the target address, forcing it when a kernel driver
    /// (usually `sbs-battery`) has already claimed it.
    fn select(&mut self, address: u8) -> io::Result<()> {
        let seven_bit = address >> 1;
        if self.selected == Some(seven_bit) {
            return Ok(());
        }

        let arg = libc::c_ulong::from(seven_bit);
        match self.ioctl_arg(I2C_SLAVE, arg) {
            Err(e) if is_busy(&e) => {
                warn!(
                    "{}: address 0x{seven_bit:02x} is claimed by a kernel driver, forcing access",
                    self.path.display()
                );
                self.ioctl_arg(I2C_SLAVE_FORCE, arg)?;
            }
            result => result?,
        }
        self.selected = Some(seven_bit);
        Ok(())
    }

    fn smbus_read(&mut self, address: u8, command: u8, size: u32) -> io::Result<I2cSmbusData> {
        self.select(address)?;

        let mut data = I2cSmbusData {
            block: [0; I2C_SMBUS_BLOCK_MAX + 2],
        };
        let mut args = I2cSmbusIoctlData {
            read_write: I2C_SMBUS_READ,
            command,
            size,
            data: &mut data,
        };

        // SAFETY: `args` and `data` outlive the call and match the kernel's
        // i2c_smbus_ioctl_data / i2c_smbus_data layout.
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                I2C_SMBUS as _,
                &mut args as *mut I2cSmbusIoctlData,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(data)
    }
}

#[async_trait::async_trait]
impl SmbusAdapter for I2cDevAdapter {
    async fn enable_packet_error_checking(&mut self, enable: bool) -> Result<(), SbsError> {
        self.ioctl_arg(I2C_PEC, libc::c_ulong::from(enable))?;
        Ok(())
    }

    async fn read_word(&mut self, address: u8, command: u8) -> Result<u16, SbsError> {
        let data = self
            .smbus_read(address, command, I2C_SMBUS_WORD_DATA)
            .map_err(|e| SbsError::register_read(command, e))?;
        // SAFETY: the kernel filled `word` for a WORD_DATA transfer.
        Ok(unsafe { data.word })
    }

    async fn read_block(
        &mut self,
        address: u8,
        command: u8,
        buf: &mut [u8; SBS_BLOCK_BUFFER_SIZE],
    ) -> Result<usize, SbsError> {
        let data = self
            .smbus_read(address, command, I2C_SMBUS_BLOCK_DATA)
            .map_err(|e| SbsError::register_read(command, e))?;
        // SAFETY: the kernel filled `block` for a BLOCK_DATA transfer.
        let block = unsafe { data.block };

        let len = usize::from(block[0]).min(I2C_SMBUS_BLOCK_MAX);
        buf[..len].copy_from_slice(&block[1..=len]);
        Ok(len)
    }
}
