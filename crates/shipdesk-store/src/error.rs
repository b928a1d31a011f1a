use std::path::PathBuf;

use shipdesk_types::Collection;

/// Errors from record store operations.
///
/// Unparseable persisted content is deliberately absent: it is recovered as
/// an empty collection and reported through logs, never as an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The data directory could not be created.
    #[error("cannot create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be converted to or from JSON.
    #[error("serialization error in {collection}: {reason}")]
    Serialization {
        collection: Collection,
        reason: String,
    },

    /// The freshly written temporary file could not replace the collection file.
    #[error("cannot replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
