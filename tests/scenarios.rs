//! End-to-end decoding of records as an operator would type them in.

use boot_record_translator::filesystem::ext_bpb::Extension;
use boot_record_translator::filesystem::fat_error::FATError;
use boot_record_translator::filesystem::fat_type::FATType;
use boot_record_translator::partition::disk_error::DiskError;
use boot_record_translator::partition::pt_type::lookup;
use boot_record_translator::traits::LayoutDisplay;
use boot_record_translator::{ByteRecord, FatBootSector, PTEntry, bytes_to_decimal};

/// First 62 bytes of a 1.44 MB floppy formatted by MS-DOS 5.
const FLOPPY: &str = "eb3c904d53444f53352e30000201010002e000400\
                      bf00900120002000000000000000000000029785634 \
                      124e4f204e414d45202020204641543132202020";

#[test]
fn ntfs_partition_entry() {
    let entry = PTEntry::from_hex("80 01 01 00 07 FE FF FF 3F 00 00 00 01 00 00 00").unwrap();

    assert_eq!(format!("0x{:02X}", entry.boot_code()), "0x80");
    assert_eq!(entry.pt_type().to_string(), "NTFS");
    assert_eq!(*entry.lba_start(), 63);
    assert_eq!(*entry.sector_cnt(), 1);

    let report = entry.display_layout(4);
    assert!(report.lines().all(|line| line.is_empty() || line.starts_with("    ")));
    assert!(report.contains("Partition Size: 512B"));
}

#[test]
fn partition_entry_must_be_16_bytes() {
    let mut hex = String::new();
    for len in 0..40 {
        if len != 16 {
            assert!(
                matches!(PTEntry::from_hex(&hex), Err(DiskError::InvalidLength(_))),
                "{len} bytes accepted"
            );
        }
        hex.push_str("AB ");
    }
}

#[test]
fn partition_type_lookup_is_total() {
    assert!((0..=u8::MAX).all(|code| !lookup(code).is_empty()));
    assert_eq!(lookup(0x82), "Linux Swap");
    assert_eq!(lookup(0x99), "0x99");
}

#[test]
fn little_endian_fields_decode_through_the_byte_utility() {
    let record = ByteRecord::from_hex("00 02").unwrap();
    assert_eq!(record.le_value(0..2), Ok(512));
    assert_eq!(bytes_to_decimal(&["02", "00"]), Ok(512));
}

#[test]
fn floppy_boot_sector() {
    let sector = FatBootSector::from_hex(FLOPPY, false).unwrap();

    assert_eq!(*sector.bpb().bytes_per_sec(), 512);
    assert_eq!(*sector.bpb().tot_sec_16(), 2880);
    assert_eq!(sector.fat_type(), Some(FATType::FAT12));

    let Extension::Fat12Or16(ext) = sector.extension() else {
        panic!("expected a FAT12/16 extension");
    };
    assert_eq!(*ext.boot_sig(), 0x29);
    assert_eq!(ext.vol_lab(), "NO NAME    ");

    let report = sector.to_string();
    assert!(report.contains("OEM name"));
    assert!(report.contains("MSDOS5.0"));
    assert!(report.contains("Data clusters: 2847 (FAT12)"));
}

#[test]
fn zero_fat_size_takes_fat32_branch() {
    // 124 hex digits, FAT size 00 00 at offset 22, 32-bit FAT size at offset 36
    let mut bytes = [0u8; 62];
    bytes[..3].copy_from_slice(&[0xEB, 0x58, 0x90]);
    bytes[3..11].copy_from_slice(b"MSWIN4.1");
    bytes[11..13].copy_from_slice(&512u16.to_le_bytes());
    bytes[13] = 8;
    bytes[14..16].copy_from_slice(&32u16.to_le_bytes());
    bytes[16] = 2;
    bytes[21] = 0xF8;
    bytes[32..36].copy_from_slice(&1_048_576u32.to_le_bytes());
    bytes[36..40].copy_from_slice(&1021u32.to_le_bytes());
    bytes[44..48].copy_from_slice(&2u32.to_le_bytes());

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    assert_eq!(hex.len(), 124);

    let sector = FatBootSector::from_hex(&hex, false).unwrap();
    assert_eq!(*sector.bpb().fat_sz_16(), 0);
    assert!(matches!(
        sector.extension(),
        Extension::Fat32 { fat_sz_32: 1021 }
    ));
    assert_eq!(sector.fat_type(), Some(FATType::FAT32));
}

#[test]
fn zero_tail_is_reported_and_skipped() {
    let record = ByteRecord::from_hex(FLOPPY).unwrap();
    let mut bytes = record.as_slice()[..36].to_vec();
    bytes.resize(100, 0);
    let hex: String = bytes.iter().map(|b| format!("{b:02X} ")).collect();

    let sector = FatBootSector::from_hex(&hex, false).unwrap();
    assert!(matches!(sector.extension(), Extension::Empty));
    assert!(sector.to_string().contains("Rest of the data is all 0s"));
}

#[test]
fn short_fat_record_depends_on_padding_policy() {
    let input = "EB 3C 90 4D 53 44 4F 53 35 2E 30 00 02 01 01";
    assert_eq!(ByteRecord::sanitize(input).len(), 30);

    assert!(matches!(
        FatBootSector::from_hex(input, false),
        Err(FATError::InsufficientLength(15))
    ));

    let sector = FatBootSector::from_hex(input, true).unwrap();
    assert_eq!(*sector.padded(), 47);
}
