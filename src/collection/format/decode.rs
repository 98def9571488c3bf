//! Parsing of `collection.db` bytes into a [`Database`].
//!
//! The decoder is a small state machine over a [`ByteCursor`]:
//!
//! ```text
//! ReadHeader ──► ReadCollectionHeader ──► ReadHashes ──┐
//!     │                  ▲                            │
//!     │                  └──── more bytes ◄───────────┤
//!     └──────────► Done ◄──────── EOF ◄───────────────┘
//! ```
//!
//! Any failed read or validation leaves the machine in `Failed` and the
//! error is returned to the caller. The header `collection_count` is not used
//! for framing; records are consumed until the buffer is exhausted.

use log::{debug, info, trace, warn};

use super::{DecodeOptions, HASH_ENTRY_LEN, HASH_MARKER, HEADER_LEN, STRING_MARKER};
use crate::collection::types::error::{CollectionError, Result};
use crate::collection::types::models::{Collection, Database};
use crate::collection::utils::{self, ByteCursor, HASH_LEN};

/// Decodes a full `collection.db` buffer with default options.
///
/// A zero-length buffer yields an empty [`Database`] with the default version.
///
/// # Errors
/// [`CollectionError::MalformedInput`] at the first structural problem:
/// truncated fields, a name length outside 1..=25, a zero hash count, a name
/// that is not UTF-8 or a hash that is not 32 lowercase hex characters.
pub fn decode(bytes: impl AsRef<[u8]>) -> Result<Database> {
    decode_with(bytes, DecodeOptions::default())
}

/// Decodes a full `collection.db` buffer.
///
/// With [`DecodeOptions::strict_count`] set, a header `collection_count` that
/// differs from the number of decoded collections is also `MalformedInput`.
pub fn decode_with(bytes: impl AsRef<[u8]>, options: DecodeOptions) -> Result<Database> {
    Decoder::new(bytes.as_ref(), options).run()
}

/// The fixed 8-byte file header, as written on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    /// Collection count announced by the writer. Not used for framing.
    pub collection_count: u32,
}

/// Reads only the header, without touching the collection records.
///
/// Returns `None` for a zero-length buffer.
///
/// # Errors
/// [`CollectionError::MalformedInput`] if the buffer is shorter than 8 bytes.
pub fn read_header(bytes: impl AsRef<[u8]>) -> Result<Option<Header>> {
    let mut cursor = ByteCursor::new(bytes.as_ref());
    parse_header(&mut cursor)
}

fn parse_header(cursor: &mut ByteCursor<'_>) -> Result<Option<Header>> {
    if cursor.is_exhausted() {
        return Ok(None);
    }
    let raw = cursor.take(HEADER_LEN, "header")?;
    trace!("Header bytes: {}", hex::encode(raw));
    let mut raw = ByteCursor::new(raw);
    let version = raw.read_u32_le("version")?;
    let collection_count = raw.read_u32_le("collection count")?;
    Ok(Some(Header {
        version,
        collection_count,
    }))
}

#[derive(Debug)]
enum DecodeState {
    ReadHeader,
    ReadCollectionHeader,
    ReadHashes { collection: Collection, remaining: u32 },
    Done,
    Failed,
}

struct Decoder<'a> {
    cursor: ByteCursor<'a>,
    options: DecodeOptions,
    state: DecodeState,
    database: Database,
    declared_count: Option<u32>,
    records: usize,
}

impl<'a> Decoder<'a> {
    fn new(bytes: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            options,
            state: DecodeState::ReadHeader,
            database: Database::new(),
            declared_count: None,
            records: 0,
        }
    }

    fn run(mut self) -> Result<Database> {
        loop {
            // A step that returns early through `?` leaves `Failed` behind.
            let state = std::mem::replace(&mut self.state, DecodeState::Failed);
            self.state = match state {
                DecodeState::ReadHeader => self.read_header()?,
                DecodeState::ReadCollectionHeader => self.read_collection_header()?,
                DecodeState::ReadHashes { collection, remaining } => {
                    self.read_hash(collection, remaining)?
                }
                DecodeState::Done => return self.finish(),
                DecodeState::Failed => {
                    return Err(CollectionError::MalformedInput(
                        "decoder resumed after a failure".to_string(),
                    ));
                }
            };
        }
    }

    fn read_header(&mut self) -> Result<DecodeState> {
        let Some(header) = parse_header(&mut self.cursor)? else {
            debug!("Empty buffer, returning empty database");
            return Ok(DecodeState::Done);
        };
        debug!(
            "Header: version={}, declared collections={}",
            header.version, header.collection_count
        );

        self.database.set_version(header.version);
        self.declared_count = Some(header.collection_count);
        Ok(self.next_record_state())
    }

    fn read_collection_header(&mut self) -> Result<DecodeState> {
        let offset = self.cursor.position();
        let prefix = self.cursor.take(2, "collection name prefix")?;
        if prefix[0] != STRING_MARKER {
            debug!("Unexpected string marker {:#04x} at offset {}", prefix[0], offset);
        }
        let name_len = prefix[1] as usize;
        let name_bytes = self.cursor.take(name_len, "collection name")?;
        let hash_count = self.cursor.read_u32_le("hash count")?;

        if !(1..=utils::MAX_NAME_LEN).contains(&name_len) || hash_count == 0 {
            return Err(CollectionError::MalformedInput(format!(
                "database is malformed: collection at offset {} has name length {} and {} hashes",
                offset, name_len, hash_count
            )));
        }

        let name = std::str::from_utf8(name_bytes).map_err(|e| {
            CollectionError::MalformedInput(format!(
                "collection name at offset {} is not valid UTF-8: {}",
                offset, e
            ))
        })?;

        let needed = hash_count as u64 * HASH_ENTRY_LEN as u64;
        if needed > self.cursor.remaining() as u64 {
            return Err(CollectionError::MalformedInput(format!(
                "collection '{}' announces {} hashes ({} bytes) but only {} bytes remain",
                name,
                hash_count,
                needed,
                self.cursor.remaining()
            )));
        }

        debug!("Reading collection '{}' with {} hashes", name, hash_count);
        let collection = Collection::new(name)?;
        Ok(DecodeState::ReadHashes {
            collection,
            remaining: hash_count,
        })
    }

    fn read_hash(&mut self, mut collection: Collection, remaining: u32) -> Result<DecodeState> {
        if remaining == 0 {
            self.records += 1;
            self.database.insert(collection);
            return Ok(self.next_record_state());
        }

        let offset = self.cursor.position();
        let marker = self.cursor.take(HASH_MARKER.len(), "hash prefix")?;
        if marker != HASH_MARKER {
            trace!("Unexpected hash prefix {} at offset {}", hex::encode(marker), offset);
        }
        let raw = self.cursor.take(HASH_LEN, "beatmap hash")?;
        let hash = std::str::from_utf8(raw)
            .ok()
            .filter(|h| utils::is_valid_hash(h))
            .ok_or_else(|| {
                CollectionError::MalformedInput(format!(
                    "database is malformed: invalid beatmap hash {} at offset {}",
                    hex::encode(raw),
                    offset + HASH_MARKER.len()
                ))
            })?;
        collection.push_validated(hash.to_owned());

        Ok(DecodeState::ReadHashes {
            collection,
            remaining: remaining - 1,
        })
    }

    fn next_record_state(&self) -> DecodeState {
        if self.cursor.is_exhausted() {
            DecodeState::Done
        } else {
            DecodeState::ReadCollectionHeader
        }
    }

    fn finish(self) -> Result<Database> {
        let actual = self.database.collection_count();
        if let Some(declared) = self.declared_count
            && declared as usize != actual
        {
            if self.options.strict_count {
                return Err(CollectionError::MalformedInput(format!(
                    "header declares {} collections but {} were decoded",
                    declared, actual
                )));
            }
            warn!(
                "Header declares {} collections but {} were decoded ({} records)",
                declared, actual, self.records
            );
        }

        info!(
            "Decoded collection database: version={}, {} collections, {} hashes",
            self.database.version(),
            actual,
            self.database.collections().map(Collection::hash_count).sum::<usize>()
        );
        Ok(self.database)
    }
}
