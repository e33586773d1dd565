//! Error types for FAT boot record decoding.
//!
//! The boot record starts with the BIOS Parameter Block (BPB), which describes the
//! physical layout of a FAT file system. This module defines the errors that can occur
//! while turning operator input into a BPB and its extension.

use std::io;
use thiserror::Error;

use crate::constants::{EXIT_DECODE_ERROR, EXIT_PADDING_DECLINED, FAT_MIN_LEN};
use crate::record_error::RecordError;

/// Errors that can occur during FAT boot record decoding.
#[derive(Error, Debug)]
pub enum FATError {
    /// The record is shorter than the minimal FAT boot record and padding was refused.
    #[error(
        "The input data is {0} bytes long, which is less than {min} bytes, the minimal size of a FAT boot record",
        min = FAT_MIN_LEN
    )]
    InsufficientLength(usize),

    /// A text field holds bytes that are neither printable ASCII nor NUL padding.
    #[error("Field `{field}` is not printable ASCII: {bytes}")]
    TextDecode { field: &'static str, bytes: String },

    /// The input could not be turned into bytes.
    #[error("Record error: {0}")]
    Record(RecordError),

    /// Parsing error occured during structure initialization
    #[error("BinRead Error: `{0}`")]
    BinReadError(binread::Error),

    /// The decoded record could not be written out.
    #[error("IO Error: {0}")]
    IOError(io::Error),
}

impl FATError {
    /// The process exit status reporting this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            FATError::InsufficientLength(_) => EXIT_PADDING_DECLINED,
            _ => EXIT_DECODE_ERROR,
        }
    }
}

/// Converts tokenization errors into FATError.
impl From<RecordError> for FATError {
    fn from(err: RecordError) -> Self {
        FATError::Record(err)
    }
}

/// Converts IO errors into FATError.
impl From<io::Error> for FATError {
    fn from(err: io::Error) -> Self {
        FATError::IOError(err)
    }
}

/// Converts BinRead errors into FATError.
impl From<binread::Error> for FATError {
    fn from(err: binread::Error) -> Self {
        FATError::BinReadError(err)
    }
}
