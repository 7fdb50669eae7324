use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
};

use crate::core::errors::StoreError;

use super::{Collection, EntityStore, Result};

/// In-process store, mainly for tests and previews.
///
/// Loads and saves can be switched to fail to exercise fallback paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<Collection, String>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(self, collection: Collection, json: impl Into<String>) -> Self {
        if let Ok(mut blobs) = self.blobs.write() {
            blobs.insert(collection, json.into());
        }
        self
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Raw blob currently stored for `collection`.
    pub fn blob(&self, collection: Collection) -> Option<String> {
        self.blobs
            .read()
            .ok()
            .and_then(|blobs| blobs.get(&collection).cloned())
    }
}

impl EntityStore for MemoryStore {
    fn load(&self, collection: Collection) -> Result<Option<String>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("load of {collection} refused")));
        }
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        Ok(blobs.get(&collection).cloned())
    }

    fn save(&self, collection: Collection, json: &str) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("save of {collection} refused")));
        }
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        blobs.insert(collection, json.to_string());
        Ok(())
    }
}
