//! Custom error types for the osu-collection crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A model operation was given a structurally invalid value
    /// (version out of range, bad name length, malformed hash).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A removal targeted a collection name or hash that is not present.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The database cannot be represented on disk in its current shape.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The byte sequence violates the collection.db layout.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` type alias using the crate's `CollectionError` type.
pub type Result<T> = std::result::Result<T, CollectionError>;
