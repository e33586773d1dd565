//! FAT12/16/32 boot sector decoding.

pub mod bpb;
pub mod ext_bpb;
pub mod fat;
pub mod fat_error;
pub mod fat_type;
