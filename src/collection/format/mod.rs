//! Byte layout of `collection.db` and the codec built on it.
//!
//! # Module Organization
//!
//! - [`encode`]: turns a [`Database`](crate::Database) into bytes
//! - [`decode`]: parses bytes back into a [`Database`](crate::Database)
//!
//! # Layout
//!
//! All integers are little-endian. There is no checksum, no padding and no
//! trailing length: the record stream ends at EOF.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ version           u32        │ ← header (8 bytes)
//! │ collection_count  u32        │
//! ├──────────────────────────────┤
//! │ 0x0B, name_len    2 bytes    │ ← collection record, repeated
//! │ name              name_len   │
//! │ hash_count        u32        │
//! │ ┌──────────────────────────┐ │
//! │ │ 0x0B 0x20       2 bytes  │ │ ← hash entry, ×hash_count
//! │ │ md5 hex         32 bytes │ │
//! │ └──────────────────────────┘ │
//! └──────────────────────────────┘
//! ```

pub mod decode;
pub mod encode;

use crate::collection::utils::HASH_LEN;

/// Size of the fixed file header.
pub const HEADER_LEN: usize = 8;

/// Tag byte in front of every length-prefixed string.
pub const STRING_MARKER: u8 = 0x0B;

/// Prefix of every hash entry: the string tag plus a length byte of 32 (`' '`).
pub const HASH_MARKER: [u8; 2] = [STRING_MARKER, HASH_LEN as u8];

/// Bytes taken by one hash entry on disk.
pub const HASH_ENTRY_LEN: usize = HASH_MARKER.len() + HASH_LEN;

/// Knobs for [`decode::decode_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject files whose header `collection_count` disagrees with the number
    /// of collections actually decoded. Off by default, which matches what the
    /// client tolerates.
    pub strict_count: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict_count: true }
    }
}
