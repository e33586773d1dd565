//! This module decodes a single Master Boot Record (MBR) partition table entry.
//!
//! An entry is 16 bytes long. Its multi-byte fields are stored in little-endian byte
//! order, the CHS addresses being 3-byte integers.
use binread::BinRead;
use getset::Getters;
use std::fmt::{self, Display};

use super::disk_error::DiskError;
use super::pt_type::PTType;
use crate::constants::{PT_ENTRY_LEN, SECTOR_SIZE};
use crate::record::{ByteRecord, be_value};
use crate::traits::LayoutDisplay;

/// Represents the boot indicator of a partition table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootIndicator {
    /// Bootable partition (0x80).
    Active,
    /// Non-bootable partition (0x00).
    Inactive,
    /// Any other value, which legacy BIOSes refuse.
    Invalid(u8),
}

impl BootIndicator {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x80 => BootIndicator::Active,
            0x00 => BootIndicator::Inactive,
            other => BootIndicator::Invalid(other),
        }
    }
}

impl Display for BootIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootIndicator::Active => write!(f, "active"),
            BootIndicator::Inactive => write!(f, "inactive"),
            BootIndicator::Invalid(_) => write!(f, "invalid"),
        }
    }
}

/// Represents a single partition table entry.
#[derive(BinRead, Debug, Getters)]
#[br(little)]
pub struct PTEntry {
    /// Boot indicator byte (0x80 for the active partition).
    #[get = "pub"]
    boot_code: u8,
    /// CHS address of the first sector, little-endian.
    chs_start: [u8; 3],
    /// The type of the partition.
    #[br(map = |b: u8| PTType::from_byte(b))]
    #[get = "pub"]
    pt_type: PTType,
    /// CHS address of the last sector, little-endian.
    chs_end: [u8; 3],
    /// The starting Logical Block Address (LBA) of the partition.
    #[get = "pub"]
    lba_start: u32,
    /// The number of sectors in the partition.
    #[get = "pub"]
    sector_cnt: u32,
}

impl PTEntry {
    /// Decodes a partition table entry typed in as a hex string.
    ///
    /// # Parameters
    /// - `input`: Hex digits, optionally space separated, in any case.
    ///
    /// # Returns
    /// - `Ok(PTEntry)` if the input holds exactly 16 valid bytes.
    /// - `Err(DiskError::InvalidLength)` if the input is not 32 hex digits long.
    /// - `Err(DiskError::Record)` if the input contains non-hex characters.
    pub fn from_hex(input: &str) -> Result<PTEntry, DiskError> {
        let digits = ByteRecord::sanitize(input).chars().count();
        if digits != PT_ENTRY_LEN * 2 {
            return Err(DiskError::InvalidLength(digits));
        }

        let record = ByteRecord::from_hex(input)?;
        Self::from_record(&record)
    }

    /// Decodes a partition table entry from an already tokenized record.
    pub fn from_record(record: &ByteRecord) -> Result<PTEntry, DiskError> {
        if record.len() != PT_ENTRY_LEN {
            return Err(DiskError::InvalidLength(record.len() * 2));
        }

        let entry: PTEntry = record.read_at(0)?;
        log::debug!("Decoded partition entry: {entry:?}");
        Ok(entry)
    }

    pub fn boot_indicator(&self) -> BootIndicator {
        BootIndicator::from_byte(self.boot_code)
    }

    /// CHS address of the first sector.
    pub fn chs_start(&self) -> u32 {
        chs_to_u32(self.chs_start)
    }

    /// CHS address of the last sector.
    pub fn chs_end(&self) -> u32 {
        chs_to_u32(self.chs_end)
    }

    /// The partition size in bytes, assuming 512-byte sectors.
    pub fn size_bytes(&self) -> u64 {
        u64::from(self.sector_cnt) * SECTOR_SIZE
    }

    /// The partition size in units of `1024^power` bytes, fractional part kept.
    pub fn size_scaled(&self, power: u32) -> f64 {
        (0..power).fold(self.size_bytes() as f64, |size, _| size / 1024.0)
    }
}

/// Reads a 3-byte little-endian CHS address.
fn chs_to_u32(chs: [u8; 3]) -> u32 {
    let [low, mid, high] = chs;
    // Three bytes always fit in a u32.
    be_value([high, mid, low]) as u32
}

impl Display for PTEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! field {
            ($name:expr, $offset:expr, $val:expr) => {{
                writeln!(f, "  {:<22} 0x{:>02X}: {}", $name, $offset, $val)?;
            }};
        }

        writeln!(f, "MBR Partition Entry:")?;

        field!(
            "Boot Code",
            0x00,
            format!("0x{:02X} ({})", self.boot_code, self.boot_indicator())
        );
        field!("Starting CHS Address", 0x01, self.chs_start());
        field!(
            "Partition Type",
            0x04,
            format!("{} (0x{:02X})", self.pt_type, self.pt_type.code())
        );
        field!("Ending CHS Address", 0x05, self.chs_end());
        field!("Starting LBA Address", 0x08, self.lba_start);
        field!("Size in Sectors", 0x0C, self.sector_cnt);

        writeln!(f)?;
        writeln!(f, "  Assumed Sector Size: {SECTOR_SIZE}B")?;
        writeln!(f, "  Partition Size: {}B", self.size_bytes())?;
        writeln!(f, "  Partition Size: {}KB", self.size_scaled(1))?;
        writeln!(f, "  Partition Size: {}MB", self.size_scaled(2))?;
        writeln!(f, "  Partition Size: {}GB", self.size_scaled(3))?;

        Ok(())
    }
}

impl LayoutDisplay for PTEntry {}
