//! Snapshot persistence
//!
//! The ledger is persisted as one JSON document holding every account,
//! transaction and department. Saving always writes the full document; loading
//! returns `None` when nothing has been saved yet so the caller can fall back
//! to the seed data.
//!
//! Two stores are provided:
//! - `JsonFileStore` - `<data_dir>/<storage_key>.json` on the local filesystem
//! - `MemoryStore` - keeps the last saved snapshot in process

use crate::config::LedgerConfig;
use crate::types::{Snapshot, StoreError};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Load/save contract for whole-ledger snapshots
pub trait SnapshotStore {
    /// Return the last saved snapshot, or `None` if nothing was saved yet
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the saved snapshot with `snapshot`
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// JSON file store
///
/// Writes go to a sibling temp file first and are renamed into place, so an
/// interrupted save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Store at the location named by the configuration
    pub fn from_config(config: &LedgerConfig) -> Self {
        JsonFileStore::new(config.snapshot_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved snapshot");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        tracing::debug!(
            path = %self.path.display(),
            accounts = snapshot.accounts.len(),
            transactions = snapshot.transactions.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

/// In-process store
///
/// Useful for embedding the ledger without a filesystem and for tests that
/// need to inspect what the session saved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Snapshot>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Store that already holds `snapshot`
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        MemoryStore {
            saved: RefCell::new(Some(snapshot)),
            saves: RefCell::new(0),
        }
    }

    /// The last saved snapshot, if any
    pub fn saved(&self) -> Option<Snapshot> {
        self.saved.borrow().clone()
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(snapshot.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
