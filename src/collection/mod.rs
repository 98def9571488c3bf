//! Core collection.db codec module

pub mod format;
pub mod types;
pub mod utils;

use std::fs;
use std::path::Path;
use log::info;

pub use format::decode::{decode, decode_with, read_header, Header};
pub use format::encode::encode;
pub use format::DecodeOptions;
pub use types::error::{CollectionError, Result};
use types::models::Database;

/// Reads and decodes a `collection.db` file.
///
/// # Errors
/// [`CollectionError::Io`] if the file cannot be read, otherwise any error
/// from [`decode`].
pub fn read_database(path: impl AsRef<Path>) -> Result<Database> {
    read_database_with(path, DecodeOptions::default())
}

/// Same as [`read_database`] with explicit decode options.
pub fn read_database_with(path: impl AsRef<Path>, options: DecodeOptions) -> Result<Database> {
    let path = path.as_ref();
    info!("Opening collection database: {}", path.display());
    let bytes = fs::read(path)?;
    decode_with(bytes, options)
}

/// Encodes `database` and writes it to `path`, replacing any existing file.
///
/// Encoding happens before the file is touched, so an [`encode`] failure
/// leaves the existing file as it was.
pub fn write_database(path: impl AsRef<Path>, database: &Database) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(database)?;
    fs::write(path, &bytes)?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
