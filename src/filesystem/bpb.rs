//! FAT Bpb structure.
//!
//! This module implements:
//! - Decoding of the BIOS Parameter Block (Bpb) shared by FAT12, FAT16 and FAT32
//! - Advisory checks against Microsoft's FAT specification
//!
//! The common Bpb spans the first 36 bytes of a boot record. Everything after that
//! depends on the FAT type and is handled by [`super::ext_bpb`].

use binread::BinRead;
use getset::Getters;
use std::borrow::Cow;
use std::fmt;

use super::fat_error::FATError;
use crate::record::{ByteRecord, hex_pairs};
use crate::traits::LayoutDisplay;

/// BIOS Parameter Block structure for FAT filesystems.
///
/// The Bpb contains essential information about the filesystem layout and properties.
/// Multi-byte values are stored in little-endian byte order.
#[derive(BinRead, Debug, Getters)]
#[br(little)]
pub struct Bpb {
    /// Jump instruction to boot code (must be 0xEB ?? 0x90 or 0xE9 ?? ??)
    #[get = "pub"]
    jmp: [u8; 3],
    /// OEM identifier (e.g., "MSWIN4.1")
    oem_name: [u8; 8],
    /// Number of bytes per sector (512, 1024, 2048, or 4096)
    #[get = "pub"]
    bytes_per_sec: u16,
    /// Number of sectors per cluster (power of 2: 1, 2, 4, 8, 16, 32, 64, or 128)
    #[get = "pub"]
    sec_per_clus: u8,
    /// Number of reserved sectors from start of volume
    #[get = "pub"]
    rsvd_sec_cnt: u16,
    /// Number of FAT copies (typically 2 for redundancy)
    #[get = "pub"]
    num_fat: u8,
    /// Maximum number of root directory entries (0 for FAT32)
    #[get = "pub"]
    root_ent_cnt: u16,
    /// Total sectors for volumes < 32MB (0 for FAT32)
    #[get = "pub"]
    tot_sec_16: u16,
    /// Media descriptor (0xF8 for fixed disk)
    #[get = "pub"]
    media: u8,
    /// Sectors per FAT for FAT12/FAT16 (0 for FAT32)
    #[get = "pub"]
    fat_sz_16: u16,
    /// Sectors per track
    #[get = "pub"]
    sec_per_trk: u16,
    /// Number of heads
    #[get = "pub"]
    num_heads: u16,
    /// Number of hidden sectors preceding the partition
    #[get = "pub"]
    hidd_sec: u32,
    /// Total sectors for volumes >= 32MB
    #[get = "pub"]
    tot_sec_32: u32,
}

/// Checks that a text field only holds printable ASCII, followed by optional NUL padding.
///
/// # Errors
/// - `FATError::TextDecode` naming `field` if any other byte is found, a NUL
///   followed by text included.
pub(super) fn check_text(field: &'static str, bytes: &[u8]) -> Result<(), FATError> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    if bytes[..end].iter().all(|b| (0x20..=0x7E).contains(b)) {
        Ok(())
    } else {
        Err(FATError::TextDecode {
            field,
            bytes: hex_pairs(bytes),
        })
    }
}

/// Renders a checked text field, trailing NUL padding removed.
pub(super) fn text(bytes: &[u8]) -> Cow<'_, str> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end])
}

impl Bpb {
    /// Decodes the common Bpb from the first 36 bytes of a record.
    ///
    /// # Returns
    /// - `Ok(Bpb)`: The decoded Bpb
    /// - `Err(FATError)`: If the record is too short or the OEM name is not text
    pub fn from_record(record: &ByteRecord) -> Result<Bpb, FATError> {
        let bpb: Bpb = record.read_at(0)?;

        for anomaly in bpb.anomalies() {
            log::warn!("{anomaly}");
        }

        bpb.validate()
    }

    /// The OEM identifier.
    pub fn oem_name(&self) -> Cow<'_, str> {
        text(&self.oem_name)
    }

    /// The total count of sectors, taken from whichever of the two fields is set.
    pub fn tot_sec(&self) -> u32 {
        if self.tot_sec_16 != 0 {
            self.tot_sec_16.into()
        } else {
            self.tot_sec_32
        }
    }

    /// The count of sectors occupied by the FAT12/16 root directory.
    ///
    /// Returns `None` if the count of bytes per sector is 0.
    pub fn root_dir_sectors(&self) -> Option<u32> {
        if self.bytes_per_sec == 0 {
            return None;
        }
        Some((u32::from(self.root_ent_cnt) * 32).div_ceil(self.bytes_per_sec.into()))
    }

    /// Lists the deviations from Microsoft's FAT specification.
    ///
    /// These are only advisories: the fields are decoded whatever their values.
    pub fn anomalies(&self) -> Vec<String> {
        let mut anomalies = vec![];

        if !((self.jmp[0] == 0xEB && self.jmp[2] == 0x90) || self.jmp[0] == 0xE9) {
            anomalies.push(format!(
                "Invalid jump instruction `0x{:02X}{:02X}{:02X}`",
                self.jmp[0], self.jmp[1], self.jmp[2],
            ));
        }

        const VALID_BYTES_PER_SEC: [u16; 4] = [512, 1024, 2048, 4096];
        if !VALID_BYTES_PER_SEC.contains(&self.bytes_per_sec) {
            anomalies.push(format!(
                "Invalid count of bytes per sector: `{}`. Legal values: 512, 1024, 2048 or 4096",
                self.bytes_per_sec
            ));
        }

        const VALID_SEC_PER_CLUS: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];
        if !VALID_SEC_PER_CLUS.contains(&self.sec_per_clus) {
            anomalies.push(format!(
                "Invalid number of sector per cluster: `{}`. Legal values: 1, 2, 4, 8, 16, 32, 64, 128",
                self.sec_per_clus
            ));
        }

        let clus_sz = u32::from(self.bytes_per_sec) * u32::from(self.sec_per_clus);
        if clus_sz > 32 * 1024 {
            anomalies.push(format!(
                "Invalid cluster size: `{clus_sz}`. Any value greater than 32K is invalid."
            ));
        }

        if self.rsvd_sec_cnt == 0 {
            anomalies.push(String::from(
                "Invalid count of reserved sectors: `0`. Any value greater than 0 is valid.",
            ));
        }

        if self.num_fat == 0 {
            anomalies.push(String::from("Invalid number of FATs on this volume: `0`."));
        }

        anomalies
    }

    fn validate(self) -> Result<Self, FATError> {
        check_text("OEM name", &self.oem_name)?;
        Ok(self)
    }
}

/// Implements the Display trait for Bpb
impl fmt::Display for Bpb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut offset = 0;

        macro_rules! field {
            ($name:expr, $val:expr, $size:expr) => {{
                writeln!(f, "  {:<42} 0x{:>02X}: {}", $name, offset, $val)?;
                offset += $size;
            }};
        }

        writeln!(f, "BIOS Parameter Block (Bpb):")?;

        field!("Boot Code Jump Assembly Instruction", hex_pairs(&self.jmp), 3);
        field!("OEM name", self.oem_name(), 8);
        field!(
            "Bytes per sector",
            format!("{0} (0x{0:04X})", self.bytes_per_sec),
            2
        );
        field!("Sectors per cluster", self.sec_per_clus, 1);
        field!(
            "Reserved area size",
            format!("{0} (0x{0:04X})", self.rsvd_sec_cnt),
            2
        );
        field!("Number of FATs", self.num_fat, 1);
        field!(
            "Maximum number of files in root directory",
            format!("{0} (0x{0:04X})", self.root_ent_cnt),
            2
        );
        field!(
            "Number of sectors",
            format!("{0} (0x{0:04X})", self.tot_sec_16),
            2
        );
        field!("Media type", format!("0x{:02X}", self.media), 1);
        field!(
            "Size of each FAT",
            format!("{0} (0x{0:04X})", self.fat_sz_16),
            2
        );
        field!("Sectors per track", self.sec_per_trk, 2);
        field!("Number of heads", self.num_heads, 2);
        field!("Hidden sectors", self.hidd_sec, 4);
        field!("Number of sectors (32-bit)", self.tot_sec_32, 4);

        debug_assert_eq!(offset, crate::constants::EXT_BPB_OFFSET);
        Ok(())
    }
}

impl LayoutDisplay for Bpb {}
