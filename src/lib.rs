//!
//! Boot record translator: a library and CLI for decoding boot sector records typed
//! in as hex strings.
//!
//! This crate provides tools for:
//! - Turning operator supplied hex strings into byte records
//! - Decoding Master Boot Record (MBR) partition table entries
//! - Decoding FAT12/16/32 boot sectors and their BIOS Parameter Block (BPB)
//! - Handling user commands for the interactive shell
//!
//! Every decoder is a pure function of its input. Reading and printing is left to
//! the caller.
//!
//! # Re-exports
//! - [`PTEntry`]: MBR partition table entry
//! - [`FatBootSector`]: FAT boot record
//! - [`ByteRecord`]: Raw bytes decoded from a hex string

pub mod commands;
pub mod constants;
pub mod filesystem;
pub mod partition;
pub mod record;
pub mod record_error;
pub mod traits;

/// FAT boot record (see [`filesystem::fat::FatBootSector`]).
pub use crate::filesystem::fat::FatBootSector;
/// MBR partition table entry (see [`partition::mbr::PTEntry`]).
pub use crate::partition::mbr::PTEntry;
/// Raw bytes decoded from a hex string (see [`record::ByteRecord`]).
pub use crate::record::{ByteRecord, bytes_to_decimal};
