//! In-memory model of a collection database.
//!
//! A [`Database`] owns an ordered list of [`Collection`]s, each owning an
//! ordered list of beatmap hashes. Counts are derived from the lists, so the
//! header and per-collection counts written to disk can never drift from the
//! data.

use std::fmt::Display;
use log::trace;

use super::error::{CollectionError, Result};
use crate::collection::utils;

/// Client version stamp written by default into new databases.
pub const OSU_VERSION: u32 = 20191211;

/// A named, ordered list of beatmap MD5 hashes.
///
/// Duplicate hashes are allowed and kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    name: String,
    hashes: Vec<String>,
}

impl Collection {
    /// Creates an empty collection.
    ///
    /// # Errors
    /// [`CollectionError::InvalidArgument`] if the name is empty or longer
    /// than 25 bytes once UTF-8 encoded.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        utils::validate_name(&name)?;
        Ok(Self {
            name,
            hashes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The hashes in on-disk order.
    pub fn hashes(&self) -> &[String] {
        &self.hashes
    }

    pub fn hash_count(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn contains_beatmap(&self, hash: &str) -> bool {
        self.hashes.iter().any(|h| h == hash)
    }

    /// Appends a beatmap hash to the end of the collection.
    ///
    /// # Errors
    /// [`CollectionError::InvalidArgument`] unless `hash` is exactly 32
    /// characters from `[0-9a-f]`.
    pub fn append_beatmap(&mut self, hash: impl Into<String>) -> Result<&mut Self> {
        let hash = hash.into();
        utils::validate_hash(&hash)?;
        self.push_validated(hash);
        Ok(self)
    }

    /// Removes the first occurrence of `hash`.
    ///
    /// # Errors
    /// [`CollectionError::NotFound`] if the hash is not in this collection.
    pub fn remove_beatmap(&mut self, hash: &str) -> Result<&mut Self> {
        let idx = self.hashes.iter().position(|h| h == hash).ok_or_else(|| {
            CollectionError::NotFound(format!(
                "beatmap hash {} not found in collection '{}'",
                hash, self.name
            ))
        })?;
        self.hashes.remove(idx);
        Ok(self)
    }

    /// Appends a hash the caller has already checked against the hash pattern.
    pub(crate) fn push_validated(&mut self, hash: String) {
        trace!("Collection '{}': appending {}", self.name, hash);
        self.hashes.push(hash);
    }
}

/// A collection database: a version stamp plus collections in on-disk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    version: u32,
    collections: Vec<Collection>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Creates an empty database stamped with [`OSU_VERSION`].
    pub fn new() -> Self {
        Self {
            version: OSU_VERSION,
            collections: Vec::new(),
        }
    }

    /// Creates an empty database with an explicit version stamp.
    ///
    /// # Errors
    /// [`CollectionError::InvalidArgument`] if `version` is negative or does
    /// not fit in a `u32`.
    pub fn with_version<V>(version: V) -> Result<Self>
    where
        V: TryInto<u32> + Display + Copy,
    {
        let version = version.try_into().map_err(|_| {
            CollectionError::InvalidArgument(format!(
                "provide version as a non-negative 32-bit number (got {})",
                version
            ))
        })?;
        Ok(Self {
            version,
            collections: Vec::new(),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    /// Number of collections; always equal to what `encode` writes in the header.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Iterates collections in on-disk order.
    pub fn collections(&self) -> std::slice::Iter<'_, Collection> {
        self.collections.iter()
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.name == name)
    }

    pub fn contains_collection(&self, name: &str) -> bool {
        self.collection(name).is_some()
    }

    /// Creates an empty collection called `name` and returns it for filling.
    ///
    /// An existing collection with the same name is replaced in place: it
    /// keeps its position in the order but loses its hashes.
    ///
    /// # Errors
    /// [`CollectionError::InvalidArgument`] if the name is empty or longer
    /// than 25 bytes.
    pub fn append_collection(&mut self, name: impl Into<String>) -> Result<&mut Collection> {
        let collection = Collection::new(name)?;
        Ok(self.insert(collection))
    }

    /// Detaches and returns the collection called `name`.
    ///
    /// # Errors
    /// [`CollectionError::NotFound`] if no collection has that name.
    pub fn remove_collection(&mut self, name: &str) -> Result<Collection> {
        let idx = self
            .collections
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| {
                CollectionError::NotFound(format!("collection '{}' not found in this database", name))
            })?;
        Ok(self.collections.remove(idx))
    }

    /// Inserts with last-write-wins semantics on the name.
    pub(crate) fn insert(&mut self, collection: Collection) -> &mut Collection {
        let idx = match self.collections.iter().position(|c| c.name == collection.name) {
            Some(idx) => {
                trace!("Replacing existing collection '{}'", collection.name);
                self.collections[idx] = collection;
                idx
            }
            None => {
                self.collections.push(collection);
                self.collections.len() - 1
            }
        };
        &mut self.collections[idx]
    }
}
