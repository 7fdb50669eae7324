use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::StoreError,
    utils::{ensure_dir, write_atomic, PathResolver},
};

pub const DEFAULT_TRAILING_MONTHS: usize = 6;
pub const DEFAULT_TRAILING_DAYS: usize = 7;
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

/// User preferences persisted next to the collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    pub trailing_months: usize,
    pub trailing_days: usize,
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "INR".into(),
            theme: None,
            trailing_months: DEFAULT_TRAILING_MONTHS,
            trailing_days: DEFAULT_TRAILING_DAYS,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StoreError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StoreError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, StoreError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, StoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Like [`ConfigManager::load`], but falls back to defaults on any failure.
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "config unreadable, using defaults");
                Config::default()
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
