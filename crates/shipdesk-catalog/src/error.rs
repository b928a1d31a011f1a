use shipdesk_audit::AuditError;
use shipdesk_store::StoreError;

/// Errors produced by package catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("audit error: {0}")]
    Audit(#[from] AuditError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
