use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use shipdesk_types::Collection;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::locks::{CollectionGuard, CollectionLocks};
use crate::traits::RecordStore;

/// File-backed record store: one JSON array per collection.
///
/// On-disk format is a UTF-8, two-space indented JSON array with non-ASCII
/// characters written as-is. Saves go to a temporary file in the data
/// directory which is synced and then renamed over the collection file, so
/// a crash mid-save leaves the previous content in place.
pub struct JsonFileStore {
    config: StoreConfig,
    locks: CollectionLocks,
}

impl JsonFileStore {
    /// Open a store rooted at `config.data_dir`, creating the directory if needed.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let store = Self {
            config,
            locks: CollectionLocks::new(),
        };
        store.ensure_data_dir()?;
        debug!(data_dir = %store.config.data_dir.display(), "record store opened");
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        self.config.data_dir()
    }

    /// Backing file of a collection.
    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.config.path_for(collection)
    }

    fn ensure_data_dir(&self) -> StoreResult<()> {
        let dir = self.config.data_dir();
        fs::create_dir_all(dir).map_err(|source| StoreError::DataDir {
            path: dir.to_path_buf(),
            source,
        })
    }
}

impl RecordStore for JsonFileStore {
    fn load_values(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        self.ensure_data_dir()?;
        let path = self.path_of(collection);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%collection, "collection file absent; empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(values)) => {
                debug!(%collection, records = values.len(), "collection loaded");
                Ok(values)
            }
            Ok(_) => {
                warn!(
                    %collection,
                    path = %path.display(),
                    "collection file is not a JSON array; treating as empty"
                );
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(
                    %collection,
                    path = %path.display(),
                    error = %e,
                    "collection file is not valid JSON; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_values(&self, collection: Collection, values: &[Value]) -> StoreResult<()> {
        self.ensure_data_dir()?;
        let path = self.path_of(collection);

        let payload = serde_json::to_vec_pretty(values).map_err(|e| StoreError::Serialization {
            collection,
            reason: e.to_string(),
        })?;

        let mut tmp = NamedTempFile::new_in(self.config.data_dir())?;
        tmp.write_all(&payload)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(%collection, records = values.len(), bytes = payload.len(), "collection saved");
        Ok(())
    }

    fn lock(&self, collection: Collection) -> CollectionGuard<'_> {
        self.locks.lock(collection)
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("data_dir", &self.config.data_dir)
            .finish()
    }
}
