//! The part of a FAT boot record that follows the common Bpb.
//!
//! Its layout depends on the FAT type. FAT12 and FAT16 volumes store an extended
//! Bpb at offset 36. FAT32 volumes store their 32-bit FAT size there, followed by
//! FAT32 specific fields which are not decoded.

use binread::BinRead;
use getset::Getters;
use std::borrow::Cow;
use std::fmt;

use super::bpb::{Bpb, check_text, text};
use super::fat_error::FATError;
use crate::constants::{EXT_BPB_OFFSET, FAT_MIN_LEN};
use crate::record::ByteRecord;

/// Extended BIOS Parameter Block of FAT12 and FAT16 volumes.
#[derive(BinRead, Debug, Getters)]
#[br(little)]
pub struct ExtBpb {
    /// BIOS INT13h drive number (0x80 for hard disk)
    #[get = "pub"]
    drv_num: u8,
    /// Reserved (used by Windows NT)
    _reserved_1: u8,
    /// Extended boot signature (0x29)
    #[get = "pub"]
    boot_sig: u8,
    /// Volume serial number, in on-disk byte order
    #[get = "pub"]
    vol_id: [u8; 4],
    /// Volume label (11 bytes)
    vol_lab: [u8; 11],
    /// Filesystem type label (e.g. "FAT16   ")
    fil_sys_type: [u8; 8],
}

impl ExtBpb {
    /// Decodes the extended Bpb stored at offsets 36 to 61.
    pub fn from_record(record: &ByteRecord) -> Result<ExtBpb, FATError> {
        let ext: ExtBpb = record.read_at(EXT_BPB_OFFSET)?;
        ext.validate()
    }

    pub fn vol_lab(&self) -> Cow<'_, str> {
        text(&self.vol_lab)
    }

    pub fn fil_sys_type(&self) -> Cow<'_, str> {
        text(&self.fil_sys_type)
    }

    fn validate(self) -> Result<Self, FATError> {
        check_text("Volume label", &self.vol_lab)?;
        check_text("File system type label", &self.fil_sys_type)?;
        Ok(self)
    }
}

impl fmt::Display for ExtBpb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut offset = EXT_BPB_OFFSET;

        macro_rules! field {
            ($name:expr, $val:expr, $size:expr) => {{
                writeln!(f, "  {:<42} 0x{:>02X}: {}", $name, offset, $val)?;
                offset += $size;
            }};
        }

        writeln!(f, "Extended BIOS Parameter Block (FAT12/16):")?;

        field!("BIOS INT13h drive number", format!("0x{:02X}", self.drv_num), 1);
        offset += 1;
        field!("Extended boot signature", format!("0x{:02X}", self.boot_sig), 1);
        let serial: String = self.vol_id.iter().map(|b| format!("{b:02X}")).collect();
        field!("Volume serial number", format!("0x{serial}"), 4);
        field!("Volume label", self.vol_lab(), 11);
        field!("File system type label", self.fil_sys_type(), 8);

        debug_assert_eq!(offset, FAT_MIN_LEN);
        Ok(())
    }
}

/// What follows the common Bpb in a boot record.
#[derive(Debug)]
pub enum Extension {
    /// Every byte from offset 36 on is zero: nothing left to decode.
    Empty,
    /// The size of each FAT in the common Bpb is set: FAT12 or FAT16 volume.
    Fat12Or16(ExtBpb),
    /// The size of each FAT in the common Bpb is 0: FAT32 volume.
    /// Only the 32-bit FAT size is decoded.
    Fat32 { fat_sz_32: u32 },
}

impl Extension {
    /// Decodes the part of `record` following the common Bpb.
    ///
    /// # Errors
    /// - `FATError::InsufficientLength` if the record is shorter than 62 bytes.
    /// - `FATError::TextDecode` if a FAT12/16 text field is not ASCII.
    pub fn from_record(record: &ByteRecord, bpb: &Bpb) -> Result<Extension, FATError> {
        if record.len() < FAT_MIN_LEN {
            return Err(FATError::InsufficientLength(record.len()));
        }

        if record.is_zero_from(EXT_BPB_OFFSET) {
            log::info!("Rest of the data is all 0s");
            return Ok(Extension::Empty);
        }

        if *bpb.fat_sz_16() != 0 {
            return Ok(Extension::Fat12Or16(ExtBpb::from_record(record)?));
        }

        log::debug!("Size of each FAT is 0: FAT32 layout");
        let fat_sz_32 = record.le_value(EXT_BPB_OFFSET..EXT_BPB_OFFSET + 4)?;
        Ok(Extension::Fat32 {
            // Four bytes always fit in a u32.
            fat_sz_32: fat_sz_32 as u32,
        })
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extension::Empty => {
                writeln!(f, "Rest of the data is all 0s")?;
                writeln!(f, "Further analysis skipped")
            }
            Extension::Fat12Or16(ext) => write!(f, "{ext}"),
            Extension::Fat32 { fat_sz_32 } => {
                writeln!(f, "FAT32 Extended BIOS Parameter Block:")?;
                writeln!(
                    f,
                    "  {:<42} 0x{:>02X}: {fat_sz_32} (0x{fat_sz_32:08X})",
                    "Size of each FAT", EXT_BPB_OFFSET
                )?;
                writeln!(
                    f,
                    "  Fields from offset 0x{:02X} on are not parsed for FAT32",
                    EXT_BPB_OFFSET + 4
                )
            }
        }
    }
}
