use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shipdesk_types::Collection;

/// Where the collections live on disk.
///
/// Configured once at startup and handed to [`crate::JsonFileStore::open`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one file per collection.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Backing file of a collection.
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_dir() {
        assert_eq!(StoreConfig::default().data_dir(), Path::new("data"));
    }

    #[test]
    fn path_for_joins_file_name() {
        let config = StoreConfig::new("/srv/shipdesk");
        assert_eq!(
            config.path_for(Collection::Packages),
            PathBuf::from("/srv/shipdesk/paquetes.txt")
        );
    }
}
