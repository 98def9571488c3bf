//! # osu-collection
//!
//! A reader and writer for the osu! `collection.db` file.
//!
//! The file maps named collections to ordered lists of beatmap MD5 hashes.
//! [`Database`] and [`Collection`] are the in-memory model, [`encode`] turns a
//! model into the exact on-disk bytes and [`decode`] parses them back.
pub mod collection;

// Re-export the main types for convenience
pub use collection::{
    decode, decode_with, encode, read_database, read_database_with, read_header, write_database,
    Header,
    CollectionError, Result,
    format::DecodeOptions,
    types::models::{Collection, Database, OSU_VERSION},
};
