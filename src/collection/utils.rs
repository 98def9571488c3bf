//! Low-level validation and byte reading utilities

use std::sync::OnceLock;
use byteorder::{ByteOrder, LittleEndian};
use regex::Regex;

use super::types::error::{CollectionError, Result};

/// Longest collection name the client accepts, in UTF-8 bytes.
pub const MAX_NAME_LEN: usize = 25;

/// Width of a beatmap MD5 hash in hex characters.
pub const HASH_LEN: usize = 32;

/// Compiled regex for beatmap hash validation.
///
/// Matches exactly 32 lowercase hex characters.
static HASH_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Returns the cached beatmap hash regex pattern.
fn hash_regex() -> &'static Regex {
    HASH_PATTERN.get_or_init(|| Regex::new(r"^[0-9a-f]{32}$").expect("Invalid beatmap hash regex pattern"))
}

/// Returns `true` if `hash` is a lowercase hex MD5 digest.
pub fn is_valid_hash(hash: &str) -> bool {
    hash_regex().is_match(hash)
}

/// Returns `true` if `name` fits the one-byte length prefix the client reads.
pub fn is_valid_name(name: &str) -> bool {
    (1..=MAX_NAME_LEN).contains(&name.len())
}

pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(CollectionError::InvalidArgument(format!(
            "provide a name between 1 and {} bytes (got {} bytes)",
            MAX_NAME_LEN,
            name.len()
        )))
    }
}

pub fn validate_hash(hash: &str) -> Result<()> {
    if is_valid_hash(hash) {
        Ok(())
    } else {
        Err(CollectionError::InvalidArgument(format!(
            "provide a valid beatmap md5 hash (got {:?})",
            hash
        )))
    }
}

/// Index-based reader over a fixed byte buffer.
///
/// Every read is bounds-checked; running past the end of the buffer is a
/// [`CollectionError::MalformedInput`] naming the field that was cut short.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Consumes `len` bytes, or fails without moving if fewer remain.
    pub fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                CollectionError::MalformedInput(format!(
                    "unexpected end of input reading {} at offset {}: need {} bytes, {} remain",
                    field,
                    self.pos,
                    len,
                    self.remaining()
                ))
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u32_le(&mut self, field: &str) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4, field)?))
    }
}
