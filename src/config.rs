//! Runtime configuration, loadable from `satchel.toml`
//!
//! Every field has a default, so an empty file (or no file) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Inventory capacity must be at least 1")]
    ZeroCapacity,

    #[error("No save directory configured and no home directory found")]
    NoSaveDirectory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of general slots
    pub capacity: usize,
    /// Storage key the inventory is saved under
    pub save_key: String,
    /// Where saves go; defaults to `~/.satchel/saves`
    pub save_dir: Option<PathBuf>,
    /// Authored item catalog; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            capacity: 20,
            save_key: "inventory".to_string(),
            save_dir: None,
            catalog_path: None,
        }
    }
}

impl InventoryConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: InventoryConfig = toml::from_str(source)?;
        if config.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Configured save directory, or the per-user default
    pub fn resolved_save_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.save_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(".satchel").join("saves"))
                .ok_or(ConfigError::NoSaveDirectory),
        }
    }
}
