//! Ledger configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file at all) is a valid configuration.
//!
//! ```toml
//! data_dir = "/var/lib/smart-ledger"
//! storage_key = "smart_ledger_data_v1"
//! seed_when_missing = true
//! ```

use crate::types::StoreError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default storage key, which is also the snapshot file stem
pub const DEFAULT_STORAGE_KEY: &str = "smart_ledger_data_v1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Directory holding the snapshot file
    pub data_dir: PathBuf,
    /// Snapshot file stem
    pub storage_key: String,
    /// Load the example chart and journal when no snapshot exists yet
    pub seed_when_missing: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            data_dir: PathBuf::from("./data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_when_missing: true,
        }
    }
}

impl LedgerConfig {
    /// Read a configuration file
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Config` if it is not valid TOML for this structure.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// `<data_dir>/<storage_key>.json`
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}
