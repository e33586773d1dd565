/// The sector size assumed when converting a sector count into bytes.
pub const SECTOR_SIZE: u64 = 512;

/// The size in bytes of one MBR partition table entry.
pub const PT_ENTRY_LEN: usize = 16;

/// The minimal size in bytes of a FAT boot record holding a FAT12/16 extended BPB.
pub const FAT_MIN_LEN: usize = 62;

/// The offset at which the common BPB ends and the FAT specific fields begin.
pub const EXT_BPB_OFFSET: usize = 36;

/// Exit status of a record that could not be decoded.
pub const EXIT_DECODE_ERROR: u8 = 1;

/// Exit status of an MBR partition entry that is not 16 bytes long.
pub const EXIT_INVALID_LENGTH: u8 = 2;

/// Exit status of a short FAT record the operator refused to pad.
pub const EXIT_PADDING_DECLINED: u8 = 3;
