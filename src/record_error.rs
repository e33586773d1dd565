//! Error types for hex tokenization and byte-sequence conversion.

use thiserror::Error;

/// Errors that can occur while turning operator input into bytes.
#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    /// A token is not made of exactly two hexadecimal digits.
    #[error("Invalid hex token `{token}` at byte {offset}")]
    Format { token: String, offset: usize },

    /// The byte sequence holds a value wider than 128 bits.
    #[error("Cannot convert {0} bytes into an integer: the value exceeds 128 bits.")]
    Overflow(usize),
}
