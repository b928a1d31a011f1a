use shipdesk_store::StoreError;

/// Errors produced by audit log operations.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type AuditResult<T> = Result<T, AuditError>;
