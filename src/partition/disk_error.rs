//! Error types for MBR partition entry decoding.
//!
//! A partition table entry has a fixed size, so unlike FAT boot records there is no
//! way to decode a partial one: any length mismatch is fatal.

use thiserror;

use crate::constants::{EXIT_DECODE_ERROR, EXIT_INVALID_LENGTH, PT_ENTRY_LEN};
use crate::record_error::RecordError;

/// Represents errors that can occur during MBR partition entry parsing.
#[derive(thiserror::Error, Debug)]
pub enum DiskError {
    /// The input does not hold exactly one partition table entry.
    /// Contains the number of hex digits that were found.
    #[error(
        "Invalid input: a partition entry is {expected} hex digits long, got {0}",
        expected = PT_ENTRY_LEN * 2
    )]
    InvalidLength(usize),
    /// The input could not be turned into bytes.
    #[error("Record error: {0}")]
    Record(RecordError),
    /// Parsing error
    #[error("BinRead error: {0}")]
    BinRead(binread::Error),
}

impl DiskError {
    /// The process exit status reporting this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            DiskError::InvalidLength(_) => EXIT_INVALID_LENGTH,
            DiskError::Record(_) | DiskError::BinRead(_) => EXIT_DECODE_ERROR,
        }
    }
}

/// Converts tokenization errors into DiskError.
impl From<RecordError> for DiskError {
    fn from(err: RecordError) -> Self {
        DiskError::Record(err)
    }
}

/// Converts BinRead errors into DiskError.
impl From<binread::Error> for DiskError {
    fn from(err: binread::Error) -> Self {
        DiskError::BinRead(err)
    }
}
