//! Serialization of a [`Database`] into `collection.db` bytes.

use std::io::Write;
use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, info};

use super::{HASH_ENTRY_LEN, HASH_MARKER, HEADER_LEN, STRING_MARKER};
use crate::collection::types::error::{CollectionError, Result};
use crate::collection::types::models::{Collection, Database};

/// Encodes `database` into the exact on-disk byte sequence.
///
/// The whole database is checked before any byte is produced, so a failure
/// never yields partial output.
///
/// # Errors
/// [`CollectionError::InvalidState`] if the database has no collections or
/// any collection has no hashes.
pub fn encode(database: &Database) -> Result<Vec<u8>> {
    if database.is_empty() {
        return Err(CollectionError::InvalidState("no collections in this database".to_string()));
    }
    if let Some(empty) = database.collections().find(|c| c.is_empty()) {
        return Err(CollectionError::InvalidState(format!(
            "empty collection '{}' in database",
            empty.name()
        )));
    }

    let collection_count = to_u32(database.collection_count(), "collection count")?;
    let capacity = HEADER_LEN + database.collections().map(encoded_len).sum::<usize>();
    let mut buf = Vec::with_capacity(capacity);

    buf.write_u32::<LittleEndian>(database.version())?;
    buf.write_u32::<LittleEndian>(collection_count)?;

    for collection in database.collections() {
        write_collection(&mut buf, collection)?;
    }

    info!(
        "Encoded collection database: version={}, {} collections, {} bytes",
        database.version(),
        collection_count,
        buf.len()
    );
    Ok(buf)
}

/// Writes one collection record: name prefix, name, count, hash entries.
fn write_collection<W: Write>(out: &mut W, collection: &Collection) -> Result<()> {
    let name = collection.name().as_bytes();
    let name_len = u8::try_from(name.len()).map_err(|_| {
        CollectionError::InvalidState(format!("collection name '{}' too long to encode", collection.name()))
    })?;
    let hash_count = to_u32(collection.hash_count(), "hash count")?;
    debug!("Writing collection '{}' with {} hashes", collection.name(), hash_count);

    out.write_u8(STRING_MARKER)?;
    out.write_u8(name_len)?;
    out.write_all(name)?;
    out.write_u32::<LittleEndian>(hash_count)?;

    for hash in collection.hashes() {
        out.write_all(&HASH_MARKER)?;
        out.write_all(hash.as_bytes())?;
    }
    Ok(())
}

/// Size of a collection record on disk.
fn encoded_len(collection: &Collection) -> usize {
    2 + collection.name().len() + 4 + collection.hash_count() * HASH_ENTRY_LEN
}

fn to_u32(count: usize, field: &str) -> Result<u32> {
    u32::try_from(count)
        .map_err(|_| CollectionError::InvalidState(format!("{} {} exceeds u32 range", field, count)))
}
