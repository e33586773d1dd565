//! Raw byte records built from operator supplied hex strings.
//!
//! A record is typed in as a line of hexadecimal digits, optionally separated by
//! spaces and in any case. This module sanitizes that line, pairs up the digits into
//! bytes and offers the conversions shared by the MBR and FAT decoders.

use std::fmt;
use std::io;
use std::ops::Range;

use binread::{BinRead, BinReaderExt};

use crate::record_error::RecordError;

/// Converts an ordered sequence of 2-hex-digit tokens into an integer.
///
/// The tokens are concatenated in the given order, the first one being the most
/// significant. No byte reordering happens here: little-endian fields must be
/// reversed by the caller beforehand. Any number of tokens is accepted as long as
/// the value fits in 128 bits, so leading zero tokens never overflow.
///
/// # Errors
/// - `RecordError::Format` if a token is not exactly two hex digits.
/// - `RecordError::Overflow` if the value does not fit in a `u128`.
pub fn bytes_to_decimal<T: AsRef<str>>(tokens: &[T]) -> Result<u128, RecordError> {
    let bytes = tokens
        .iter()
        .enumerate()
        .map(|(offset, token)| parse_token(token.as_ref().as_bytes(), offset))
        .collect::<Result<Vec<u8>, RecordError>>()?;

    bytes_to_u128(&bytes)
}

/// Raw byte form of [`bytes_to_decimal`]: the first byte is the most significant one.
///
/// # Errors
/// - `RecordError::Overflow` if more than 16 bytes remain once leading zeros are
///   skipped.
pub fn bytes_to_u128(bytes: &[u8]) -> Result<u128, RecordError> {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];

    if significant.len() > 16 {
        return Err(RecordError::Overflow(bytes.len()));
    }

    Ok(fold_be(significant))
}

/// Fixed-width form of [`bytes_to_u128`], for arrays that always fit.
pub fn be_value<const N: usize>(bytes: [u8; N]) -> u128 {
    const { assert!(N <= 16, "a u128 holds at most 16 bytes") };
    fold_be(&bytes)
}

/// Folds at most 16 bytes into an integer, most significant first.
fn fold_be(bytes: &[u8]) -> u128 {
    bytes.iter().fold(0, |acc, &b| (acc << 8) | u128::from(b))
}

/// Parses a single token of two ASCII hex digits.
fn parse_token(token: &[u8], offset: usize) -> Result<u8, RecordError> {
    let invalid = || RecordError::Format {
        token: String::from_utf8_lossy(token).into_owned(),
        offset,
    };

    if token.len() != 2 || !token.iter().all(u8::is_ascii_hexdigit) {
        return Err(invalid());
    }

    // Both characters are ASCII hex digits at this point.
    let s = std::str::from_utf8(token).map_err(|_| invalid())?;
    u8::from_str_radix(s, 16).map_err(|_| invalid())
}

/// An ordered, 0-indexed sequence of bytes decoded from a hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRecord {
    bytes: Vec<u8>,
}

impl ByteRecord {
    /// Normalizes operator input: trims it, drops every whitespace and upper-cases it.
    pub fn sanitize(input: &str) -> String {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase()
    }

    /// Sanitizes `input` and pairs its digits up into bytes.
    ///
    /// # Errors
    /// - `RecordError::Format` if a pair contains a non-hex character, or if the
    ///   digit count is odd (the trailing token is reported).
    pub fn from_hex(input: &str) -> Result<Self, RecordError> {
        let sanitized = Self::sanitize(input);

        let bytes = sanitized
            .as_bytes()
            .chunks(2)
            .enumerate()
            .map(|(offset, token)| parse_token(token, offset))
            .collect::<Result<Vec<u8>, RecordError>>()?;

        Ok(ByteRecord { bytes })
    }

    /// Number of bytes in the record.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends zero bytes until the record is at least `len` bytes long.
    ///
    /// Returns the number of bytes added.
    pub fn pad_to(&mut self, len: usize) -> usize {
        let missing = len.saturating_sub(self.bytes.len());
        self.bytes.resize(self.bytes.len() + missing, 0);
        missing
    }

    /// Checks whether every byte from `offset` to the end of the record is zero.
    ///
    /// An offset past the end yields `true`.
    pub fn is_zero_from(&self, offset: usize) -> bool {
        self.bytes.get(offset..).is_none_or(|tail| tail.iter().all(|&b| b == 0))
    }

    /// Decodes the little-endian integer stored in `range`.
    ///
    /// # Errors
    /// - `RecordError::Overflow` if the value does not fit in a `u128`.
    ///
    /// # Panics
    /// Panics if the range is out of the record bounds.
    pub fn le_value(&self, range: Range<usize>) -> Result<u128, RecordError> {
        let reversed = self.bytes[range]
            .iter()
            .rev()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>();
        bytes_to_decimal(reversed.as_slice())
    }

    /// Reads a binary structure located at `offset`.
    pub fn read_at<T>(&self, offset: usize) -> binread::BinResult<T>
    where
        T: BinRead,
        T::Args: Default,
    {
        let mut reader = io::Cursor::new(self.bytes.get(offset..).unwrap_or_default());
        reader.read_le()
    }
}

/// Renders bytes as space separated, upper-case hex pairs.
pub fn hex_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for ByteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex_pairs(&self.bytes))
    }
}
