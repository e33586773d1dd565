//! FAT boot record decoding.
//!
//! This module ties the common Bpb and its FAT type dependent extension together:
//! - Sanitizes operator input and enforces the minimal boot record length
//! - Decodes the common Bpb first, then whatever follows it
//! - Derives the data cluster count and the FAT type it implies

use getset::Getters;
use std::fmt;
use std::io;

use super::bpb::Bpb;
use super::ext_bpb::Extension;
use super::fat_error::FATError;
use super::fat_type::FATType;
use crate::constants::FAT_MIN_LEN;
use crate::record::ByteRecord;
use crate::traits::LayoutDisplay;

/// Tokenizes a FAT boot record and makes sure it is long enough to be decoded.
///
/// # Parameters
/// - `input`: Hex digits, optionally space separated, in any case.
/// - `pad_on_short_input`: Whether a record shorter than 62 bytes is zero-padded
///   up to 62 bytes instead of being refused.
///
/// # Returns
/// - `Ok((ByteRecord, usize))`: The record and the number of padding bytes added
/// - `Err(FATError::Record)`: If the input contains non-hex characters
/// - `Err(FATError::InsufficientLength)`: If the record is short and padding is off
pub fn prepare_record(
    input: &str,
    pad_on_short_input: bool,
) -> Result<(ByteRecord, usize), FATError> {
    let mut record = ByteRecord::from_hex(input)?;

    if record.len() >= FAT_MIN_LEN {
        return Ok((record, 0));
    }

    if !pad_on_short_input {
        return Err(FATError::InsufficientLength(record.len()));
    }

    let padded = record.pad_to(FAT_MIN_LEN);
    log::warn!(
        "The input data is less than {FAT_MIN_LEN} bytes: {padded} zero bytes appended"
    );
    Ok((record, padded))
}

/// Decodes a prepared FAT boot record section by section and writes its report to `out`.
///
/// The common Bpb is written even when the extension cannot be decoded, and the
/// extension error is returned afterwards.
pub fn write_staged<W: io::Write>(
    out: &mut W,
    record: &ByteRecord,
    padded: usize,
    indent: u8,
) -> Result<FatBootSector, FATError> {
    let bpb = Bpb::from_record(record)?;

    match Extension::from_record(record, &bpb) {
        Ok(extension) => {
            let sector = FatBootSector::from_parts(bpb, extension, padded);
            write!(out, "{}", sector.display_layout(indent))?;
            Ok(sector)
        }
        Err(err) => {
            write!(out, "{}", bpb.display_layout(indent))?;
            Err(err)
        }
    }
}

/// A decoded FAT boot record.
#[derive(Debug, Getters)]
pub struct FatBootSector {
    /// The common BIOS Parameter Block.
    #[get = "pub"]
    bpb: Bpb,
    /// The FAT type dependent fields following the common Bpb.
    #[get = "pub"]
    extension: Extension,
    /// The number of zero bytes appended to the input.
    #[get = "pub"]
    padded: usize,
}

impl FatBootSector {
    /// Decodes a FAT boot record typed in as a hex string.
    ///
    /// See [`prepare_record`] for the meaning of `pad_on_short_input`.
    pub fn from_hex(input: &str, pad_on_short_input: bool) -> Result<Self, FATError> {
        let (record, padded) = prepare_record(input, pad_on_short_input)?;
        let mut sector = Self::from_record(&record)?;
        sector.padded = padded;
        Ok(sector)
    }

    /// Decodes a FAT boot record of at least 62 bytes.
    ///
    /// The common Bpb is decoded first: an invalid extension never hides an
    /// invalid header.
    pub fn from_record(record: &ByteRecord) -> Result<Self, FATError> {
        let bpb = Bpb::from_record(record)?;
        let extension = Extension::from_record(record, &bpb)?;

        Ok(Self::from_parts(bpb, extension, 0))
    }

    /// Assembles a boot record from separately decoded sections.
    pub fn from_parts(bpb: Bpb, extension: Extension, padded: usize) -> Self {
        FatBootSector {
            bpb,
            extension,
            padded,
        }
    }

    /// The size of one FAT in sectors, wherever it is stored.
    ///
    /// Returns `None` when neither the 16-bit nor the 32-bit field is available.
    pub fn fat_sz(&self) -> Option<u32> {
        match (self.bpb.fat_sz_16(), &self.extension) {
            (&sz, _) if sz != 0 => Some(sz.into()),
            (_, Extension::Fat32 { fat_sz_32 }) => Some(*fat_sz_32),
            _ => None,
        }
    }

    /// Determines the number of clusters in the data region.
    ///
    /// # Returns
    /// - The number of data clusters, or `None` if the Bpb values are inconsistent
    ///   (null divisors, or metadata larger than the volume).
    pub fn cluster_count(&self) -> Option<u32> {
        let root_dir_sectors = self.bpb.root_dir_sectors()?;
        let fat_sz = self.fat_sz()?;

        let meta_sec = u32::from(*self.bpb.rsvd_sec_cnt())
            .checked_add(u32::from(*self.bpb.num_fat()).checked_mul(fat_sz)?)?
            .checked_add(root_dir_sectors)?;
        let data_sec = self.bpb.tot_sec().checked_sub(meta_sec)?;

        data_sec.checked_div((*self.bpb.sec_per_clus()).into())
    }

    /// Determines the FAT type from the number of data clusters.
    pub fn fat_type(&self) -> Option<FATType> {
        self.cluster_count().map(FATType::from_cluster_count)
    }
}

impl fmt::Display for FatBootSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.padded > 0 {
            writeln!(f, "Input zero-padded with {} bytes", self.padded)?;
            writeln!(f)?;
        }

        writeln!(f, "{}", self.bpb)?;
        write!(f, "{}", self.extension)?;

        if let (Some(clus_cnt), Some(fat_type)) = (self.cluster_count(), self.fat_type()) {
            writeln!(f)?;
            writeln!(f, "Data clusters: {clus_cnt} ({fat_type})")?;
        }

        Ok(())
    }
}

impl LayoutDisplay for FatBootSector {}

#[cfg(test)]
mod tests {
    use super::*;

    const FAT16_VOLUME: &str = "EB 3C 90 6D 6B 66 73 2E 66 61 74 00 02 04 04 00 02 00 02 00 00 \
                                F8 C8 00 20 00 40 00 00 08 00 00 00 20 03 00 \
                                80 00 29 3A 1B 6F 0C 44 41 54 41 20 20 20 20 20 20 20 \
                                46 41 54 31 36 20 20 20";

    #[test]
    fn decodes_fat16_volume() {
        let sector = FatBootSector::from_hex(FAT16_VOLUME, false).unwrap();

        assert_eq!(sector.bpb().oem_name(), "mkfs.fat");
        assert_eq!(*sector.bpb().sec_per_clus(), 4);
        assert_eq!(*sector.bpb().root_ent_cnt(), 512);
        assert_eq!(*sector.bpb().tot_sec_32(), 204800);
        assert_eq!(*sector.padded(), 0);

        let Extension::Fat12Or16(ext) = sector.extension() else {
            panic!("expected a FAT12/16 extension");
        };
        assert_eq!(*ext.drv_num(), 0x80);
        assert_eq!(ext.vol_lab(), "DATA       ");
        assert_eq!(ext.fil_sys_type(), "FAT16   ");

        // (204800 - (4 + 2 * 200 + 32)) / 4
        assert_eq!(sector.fat_sz(), Some(200));
        assert_eq!(sector.cluster_count(), Some(51091));
        assert_eq!(sector.fat_type(), Some(FATType::FAT16));
    }

    #[test]
    fn short_input_is_refused_without_padding() {
        let input = "EB 3C 90 4D 53 44 4F 53 35 2E 30 00 02 01 01";
        assert!(matches!(
            FatBootSector::from_hex(input, false),
            Err(FATError::InsufficientLength(15))
        ));
    }

    #[test]
    fn short_input_is_padded_on_request() {
        let input = "EB 3C 90 4D 53 44 4F 53 35 2E 30 00 02 01 01";
        let sector = FatBootSector::from_hex(input, true).unwrap();

        assert_eq!(*sector.padded(), 47);
        assert_eq!(*sector.bpb().bytes_per_sec(), 512);
        assert!(matches!(sector.extension(), Extension::Empty));
        assert_eq!(sector.cluster_count(), None);
        assert!(sector.to_string().starts_with("Input zero-padded with 47 bytes"));
    }

    #[test]
    fn padding_leaves_long_records_untouched() {
        let (record, padded) = prepare_record(FAT16_VOLUME, true).unwrap();
        assert_eq!(record.len(), FAT_MIN_LEN);
        assert_eq!(padded, 0);
    }

    #[test]
    fn non_hex_input_is_a_record_error() {
        assert!(matches!(
            FatBootSector::from_hex("EB 3C 9X", true),
            Err(FATError::Record(_))
        ));
    }

    #[test]
    fn staged_output_keeps_the_header_of_a_bad_extension() {
        let input = FAT16_VOLUME.replacen("46 41 54 31 36", "46 41 54 31 B6", 1);
        let (record, padded) = prepare_record(&input, false).unwrap();
        let mut out = Vec::new();

        let err = write_staged(&mut out, &record, padded, 0).unwrap_err();
        assert!(matches!(
            err,
            FATError::TextDecode {
                field: "File system type label",
                ..
            }
        ));

        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("BIOS Parameter Block (Bpb):"));
        assert!(report.contains("mkfs.fat"));
        assert!(!report.contains("Extended BIOS Parameter Block"));
    }

    #[test]
    fn staged_output_of_a_valid_record() {
        let (record, padded) = prepare_record(FAT16_VOLUME, false).unwrap();
        let mut out = Vec::new();

        let sector = write_staged(&mut out, &record, padded, 2).unwrap();
        assert_eq!(sector.fat_type(), Some(FATType::FAT16));

        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("  BIOS Parameter Block (Bpb):"));
        assert!(report.contains("Extended BIOS Parameter Block (FAT12/16):"));
        assert!(report.contains("Data clusters: 51091 (FAT16)"));
    }

    #[test]
    fn inconsistent_header_has_no_cluster_count() {
        // 256 sectors on the volume, fewer than the reserved area, FATs and root directory
        let input = FAT16_VOLUME.replacen("00 20 03 00", "00 01 00 00", 1);
        let sector = FatBootSector::from_hex(&input, false).unwrap();

        assert_eq!(sector.bpb().tot_sec(), 256);
        assert_eq!(sector.fat_sz(), Some(200));
        assert_eq!(sector.cluster_count(), None);
        assert!(!sector.to_string().contains("Data clusters"));
    }
}
