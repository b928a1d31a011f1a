use thiserror::Error;

#[derive(Debug, Error)]
pub enum OfficeError {
    #[error("store error: {0}")]
    Store(#[from] shipdesk_store::StoreError),

    #[error("audit error: {0}")]
    Audit(#[from] shipdesk_audit::AuditError),

    #[error("catalog error: {0}")]
    Catalog(#[from] shipdesk_catalog::CatalogError),

    #[error("directory error: {0}")]
    Directory(#[from] shipdesk_directory::DirectoryError),

    #[error("ledger error: {0}")]
    Ledger(#[from] shipdesk_ledger::LedgerError),
}

impl OfficeError {
    /// Returns `true` if an identifier lookup matched no record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Ledger(e) if e.is_not_found())
    }

    /// Returns `true` if the caller supplied input the office rejects.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Ledger(shipdesk_ledger::LedgerError::UnknownDocumentKind(_))
        )
    }
}

pub type OfficeResult<T> = Result<T, OfficeError>;
