//! Persistence of the three entity collections.
//!
//! Each collection is one JSON array stored under its own key and is
//! rewritten in full on every save.

pub mod json_backend;
pub mod memory;

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::core::errors::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// The independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Expenses,
    Categories,
    Presets,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Expenses,
        Collection::Categories,
        Collection::Presets,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Expenses => "@expenses",
            Collection::Categories => "@categories",
            Collection::Presets => "@presets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Key-value backend holding one JSON blob per collection.
pub trait EntityStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under the collection yet.
    fn load(&self, collection: Collection) -> Result<Option<String>>;
    fn save(&self, collection: Collection, json: &str) -> Result<()>;
}

impl<S: EntityStore + ?Sized> EntityStore for Arc<S> {
    fn load(&self, collection: Collection) -> Result<Option<String>> {
        (**self).load(collection)
    }

    fn save(&self, collection: Collection, json: &str) -> Result<()> {
        (**self).save(collection, json)
    }
}

/// Loads and decodes a whole collection.
pub fn load_records<T: DeserializeOwned>(
    store: &dyn EntityStore,
    collection: Collection,
) -> Result<Option<Vec<T>>> {
    match store.load(collection)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes and overwrites a whole collection.
pub fn save_records<T: Serialize>(
    store: &dyn EntityStore,
    collection: Collection,
    records: &[T],
) -> Result<()> {
    let json = serde_json::to_string(records)?;
    store.save(collection, &json)
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
