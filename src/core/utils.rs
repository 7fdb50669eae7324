use dirs::{data_dir, home_dir};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

const APP_DIR_NAME: &str = "expense_core";
const HIDDEN_DIR_NAME: &str = ".expense_core";
const STORE_DIR: &str = "store";
const CONFIG_FILE: &str = "config.json";

/// Resolves where the app keeps its files.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to the platform data dir.
    pub fn base_dir() -> PathBuf {
        if let Some(dir) = data_dir() {
            return dir.join(APP_DIR_NAME);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(HIDDEN_DIR_NAME)
    }

    /// Uses `root` when provided, otherwise [`PathResolver::base_dir`].
    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    /// Directory holding the persisted collections.
    pub fn store_dir_in(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Writes `data` next to `path` and renames it into place.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
