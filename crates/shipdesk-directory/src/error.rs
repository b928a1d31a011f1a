use shipdesk_store::StoreError;

/// Errors produced by directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
