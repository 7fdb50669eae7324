use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, write_atomic, PathResolver};

use super::{Collection, EntityStore, Result};

const FILE_EXTENSION: &str = "json";

/// Filesystem-backed store writing one JSON file per collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens a store under `root`, or the platform data directory when `None`.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let root = PathResolver::store_dir_in(&base);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(collection.key()), FILE_EXTENSION))
    }
}

impl EntityStore for JsonFileStore {
    fn load(&self, collection: Collection) -> Result<Option<String>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, collection: Collection, json: &str) -> Result<()> {
        let path = self.collection_path(collection);
        write_atomic(&path, json)?;
        tracing::debug!(collection = %collection, path = %path.display(), "collection written");
        Ok(())
    }
}

fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if sanitized.is_empty() {
        "collection".into()
    } else {
        sanitized
    }
}
