//! MBR partition table entries and partition type names.

pub mod disk_error;
pub mod mbr;
pub mod pt_type;
